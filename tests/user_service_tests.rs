use keepactive::{
    repositories::user_repository::SqliteUserRepository,
    services::user_service::{CreateUserRequest, UserService, UserServiceError},
    test_utils::test_helpers,
};
use std::sync::Arc;

fn request(name: &str, email: &str, password: &str) -> CreateUserRequest {
    CreateUserRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_create_user_success() {
    // Create isolated test database
    let pool = test_helpers::create_test_db().await.unwrap();
    let repository = Arc::new(SqliteUserRepository::new(pool));
    let service = UserService::new(repository);

    let result = service
        .create_user(request("Ada", "ada@example.com", "password123"))
        .await;
    assert!(result.is_ok());

    let user = result.unwrap();
    assert_eq!(user.name, "Ada");
    assert_eq!(user.email, "ada@example.com");
    assert!(!user.id.is_empty());
    assert_ne!(user.password_hash, "password123");
}

#[tokio::test]
async fn test_create_user_duplicate_email() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let repository = Arc::new(SqliteUserRepository::new(pool.clone()));
    let service = UserService::new(repository);

    service
        .create_user(request("First", "duplicate@example.com", "password123"))
        .await
        .unwrap();

    // Try to create second user with same email
    let result = service
        .create_user(request("Second", "duplicate@example.com", "password456"))
        .await;
    assert!(matches!(result, Err(UserServiceError::EmailTaken)));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_email_uniqueness_is_case_sensitive() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let service = UserService::new(Arc::new(SqliteUserRepository::new(pool)));

    service
        .create_user(request("Lower", "case@example.com", "password123"))
        .await
        .unwrap();
    let result = service
        .create_user(request("Upper", "Case@example.com", "password123"))
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_create_user_invalid_input_is_not_stored() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let service = UserService::new(Arc::new(SqliteUserRepository::new(pool.clone())));

    let result = service.create_user(request("", "nope", "12345")).await;
    match result {
        Err(UserServiceError::Validation(errors)) => assert_eq!(errors.len(), 3),
        other => panic!("expected validation error, got {:?}", other),
    }

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_get_user_by_id() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let service = UserService::new(Arc::new(SqliteUserRepository::new(pool.clone())));

    let id = test_helpers::insert_test_user(&pool, "Grace", "grace@example.com", "password123")
        .await
        .unwrap();

    let user = service.get_user(&id).await.unwrap();
    assert_eq!(user.email, "grace@example.com");

    assert!(matches!(
        service.get_user("missing").await,
        Err(UserServiceError::UserNotFound)
    ));
}

#[tokio::test]
async fn test_prepared_user_is_stored_under_its_id() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let service = UserService::new(Arc::new(SqliteUserRepository::new(pool.clone())));

    let new_user = service
        .prepare_user(request("Grace", "grace@example.com", "password123"))
        .await
        .unwrap();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);

    let user = service.insert_user(&new_user).await.unwrap();
    assert_eq!(user.id, new_user.id);
    assert_eq!(service.get_user(&new_user.id).await.unwrap().name, "Grace");

    // a second insert of the same email loses on the UNIQUE constraint
    let again = keepactive::models::NewUser {
        id: "other-id".to_string(),
        ..new_user
    };
    assert!(matches!(
        service.insert_user(&again).await,
        Err(UserServiceError::EmailTaken)
    ));
}
