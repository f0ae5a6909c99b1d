use chrono::{TimeZone, Utc};
use keepactive::{
    models::reminder::ReminderRequest,
    repositories::{ReminderRepository, SqliteReminderRepository},
    services::{CompanyCatalog, ReminderService, ReminderServiceError},
    test_utils::test_helpers,
};
use sqlx::SqlitePool;
use std::sync::Arc;

async fn setup() -> (SqlitePool, ReminderService, Arc<SqliteReminderRepository>) {
    let pool = test_helpers::create_test_db().await.unwrap();
    let repository = Arc::new(SqliteReminderRepository::new(pool.clone()));
    let catalog = Arc::new(CompanyCatalog::from_companies(
        test_helpers::test_companies(),
    ));
    let service = ReminderService::new(repository.clone(), catalog);
    (pool, service, repository)
}

fn request(company_id: &str, last_entry_date: &str, custom_days: Option<i64>) -> ReminderRequest {
    ReminderRequest {
        company_id: company_id.to_string(),
        company_user_id: "me@example.com".to_string(),
        last_entry_date: last_entry_date.to_string(),
        custom_days,
    }
}

#[tokio::test]
async fn test_create_and_fetch_round_trip() {
    let (pool, service, _) = setup().await;
    let user_id = test_helpers::insert_test_user(&pool, "Owner", "owner@example.com", "password123")
        .await
        .unwrap();

    let created = service
        .create(&user_id, &request("twitter", "2024-01-01", None))
        .await
        .unwrap();
    assert_eq!(
        created.next_send_date,
        Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap()
    );

    let fetched = service.get(&created.id, &user_id).await.unwrap();
    assert_eq!(fetched, created);

    let listed = service.list(&user_id).await.unwrap();
    assert_eq!(listed, vec![created]);
}

#[tokio::test]
async fn test_custom_company_uses_override_days() {
    let (pool, service, _) = setup().await;
    let user_id = test_helpers::insert_test_user(&pool, "Owner", "owner@example.com", "password123")
        .await
        .unwrap();

    let created = service
        .create(&user_id, &request("paypal", "2024-01-01T09:30:00Z", Some(45)))
        .await
        .unwrap();
    assert_eq!(created.custom_days, Some(45));
    assert_eq!(
        created.next_send_date,
        Utc.with_ymd_and_hms(2024, 2, 15, 9, 30, 0).unwrap()
    );
}

#[tokio::test]
async fn test_update_recomputes_next_send_date() {
    let (pool, service, _) = setup().await;
    let user_id = test_helpers::insert_test_user(&pool, "Owner", "owner@example.com", "password123")
        .await
        .unwrap();

    let created = service
        .create(&user_id, &request("twitter", "2024-01-01", None))
        .await
        .unwrap();
    let updated = service
        .update(&created.id, &user_id, &request("gmail", "2024-03-01", None))
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.company_id, "gmail");
    assert_eq!(
        updated.next_send_date,
        Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()
    );
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn test_other_users_reminders_are_invisible() {
    let (pool, service, _) = setup().await;
    let owner = test_helpers::insert_test_user(&pool, "Owner", "owner@example.com", "password123")
        .await
        .unwrap();
    let intruder =
        test_helpers::insert_test_user(&pool, "Intruder", "intruder@example.com", "password123")
            .await
            .unwrap();

    let created = service
        .create(&owner, &request("twitter", "2024-01-01", None))
        .await
        .unwrap();

    assert!(service.list(&intruder).await.unwrap().is_empty());
    assert!(matches!(
        service.get(&created.id, &intruder).await,
        Err(ReminderServiceError::NotFound)
    ));
    assert!(matches!(
        service
            .update(&created.id, &intruder, &request("gmail", "2024-01-01", None))
            .await,
        Err(ReminderServiceError::NotFound)
    ));
    assert!(matches!(
        service.delete(&created.id, &intruder).await,
        Err(ReminderServiceError::NotFound)
    ));

    // the owner's row is untouched
    let still_there = service.get(&created.id, &owner).await.unwrap();
    assert_eq!(still_there.company_id, "twitter");
}

#[tokio::test]
async fn test_delete_removes_only_that_reminder() {
    let (pool, service, _) = setup().await;
    let user_id = test_helpers::insert_test_user(&pool, "Owner", "owner@example.com", "password123")
        .await
        .unwrap();

    let first = service
        .create(&user_id, &request("twitter", "2024-01-01", None))
        .await
        .unwrap();
    let second = service
        .create(&user_id, &request("gmail", "2024-01-01", None))
        .await
        .unwrap();

    service.delete(&first.id, &user_id).await.unwrap();

    let remaining = service.list(&user_id).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, second.id);
    assert!(matches!(
        service.delete(&first.id, &user_id).await,
        Err(ReminderServiceError::NotFound)
    ));
}

#[tokio::test]
async fn test_rejected_input_never_reaches_store() {
    let (pool, service, _) = setup().await;
    let user_id = test_helpers::insert_test_user(&pool, "Owner", "owner@example.com", "password123")
        .await
        .unwrap();

    assert!(matches!(
        service
            .create(&user_id, &request("myspace", "2024-01-01", None))
            .await,
        Err(ReminderServiceError::InvalidCompany(_))
    ));
    assert!(matches!(
        service
            .create(&user_id, &request("twitter", "yesterday", None))
            .await,
        Err(ReminderServiceError::Validation(_))
    ));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reminders")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_list_due_joins_owner_email() {
    let (pool, service, repository) = setup().await;
    let user_id = test_helpers::insert_test_user(&pool, "Owner", "owner@example.com", "password123")
        .await
        .unwrap();

    let soon = service
        .create(&user_id, &request("twitter", "2024-01-01", None))
        .await
        .unwrap();
    service
        .create(&user_id, &request("gmail", "2024-01-01", None))
        .await
        .unwrap();

    let at = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
    let due = repository.list_due(at).await.unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].id, soon.id);
    assert_eq!(due[0].user_email, "owner@example.com");

    // boundary is inclusive
    let exact = service.list_due(soon.next_send_date).await.unwrap();
    assert_eq!(exact.len(), 1);
}

#[tokio::test]
async fn test_deleting_user_cascades_to_reminders() {
    let (pool, service, _) = setup().await;
    let user_id = test_helpers::insert_test_user(&pool, "Owner", "owner@example.com", "password123")
        .await
        .unwrap();
    service
        .create(&user_id, &request("twitter", "2024-01-01", None))
        .await
        .unwrap();

    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(&user_id)
        .execute(&pool)
        .await
        .unwrap();

    assert!(service.list(&user_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_send_date_past_year_9999_is_rejected() {
    let (pool, service, repository) = setup().await;
    let user_id = test_helpers::insert_test_user(&pool, "Owner", "owner@example.com", "password123")
        .await
        .unwrap();

    match service
        .create(&user_id, &request("gmail", "9999-06-01", None))
        .await
    {
        Err(ReminderServiceError::Validation(errors)) => {
            assert_eq!(errors[0].field, "last_entry_date");
        }
        other => panic!("expected validation error, got {:?}", other),
    }

    // a far but representable date stays out of the due list
    let far = service
        .create(&user_id, &request("twitter", "9999-01-01", None))
        .await
        .unwrap();
    assert!(repository.list_due(Utc::now()).await.unwrap().is_empty());
    assert_eq!(service.list(&user_id).await.unwrap(), vec![far]);
}
