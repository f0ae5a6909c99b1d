use crate::error::FieldError;
use crate::models::user::{NewUser, User};
use crate::repositories::user_repository::{RepositoryError, UserRepository};
use crate::services::{password, validation};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    #[error("Invalid registration input")]
    Validation(Vec<FieldError>),
    #[error("User not found")]
    UserNotFound,
    #[error("Email already registered")]
    EmailTaken,
    #[error("Password hashing failed: {0}")]
    HashingError(String),
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Register a new account.
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User, UserServiceError> {
        let new_user = self.prepare_user(request).await?;
        self.insert_user(&new_user).await
    }

    /// Trim, validate and hash a registration, assigning the new user's id.
    /// Nothing is written.
    ///
    /// The email pre-check only gives a friendlier early answer; the store's
    /// UNIQUE constraint is what actually guarantees one account per email.
    pub async fn prepare_user(
        &self,
        request: CreateUserRequest,
    ) -> Result<NewUser, UserServiceError> {
        let name = request.name.trim();
        let email = request.email.trim();

        let errors = validation::validate_registration(name, email, &request.password);
        if !errors.is_empty() {
            return Err(UserServiceError::Validation(errors));
        }

        if self.repository.find_by_email(email).await?.is_some() {
            return Err(UserServiceError::EmailTaken);
        }

        let password_hash = password::hash_password(&request.password)
            .map_err(|e| UserServiceError::HashingError(e.to_string()))?;

        Ok(NewUser {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
        })
    }

    /// Write a prepared user. A UNIQUE violation is reported as `EmailTaken`.
    pub async fn insert_user(&self, new_user: &NewUser) -> Result<User, UserServiceError> {
        match self.repository.create_user(new_user).await {
            Ok(user) => {
                tracing::info!("Registered user {}", user.id);
                Ok(user)
            }
            Err(RepositoryError::AlreadyExists) => Err(UserServiceError::EmailTaken),
            Err(e) => Err(UserServiceError::RepositoryError(e)),
        }
    }

    /// Resolve a token subject to its account.
    pub async fn get_user(&self, id: &str) -> Result<User, UserServiceError> {
        match self.repository.find_by_id(id).await? {
            Some(user) => Ok(user),
            None => {
                tracing::warn!("Token subject {} no longer exists", id);
                Err(UserServiceError::UserNotFound)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::user_repository::MockUserRepository;
    use chrono::Utc;
    use mockall::predicate::*;

    fn request(name: &str, email: &str, password: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_email()
            .with(eq("test@example.com"))
            .times(1)
            .returning(|_| Box::pin(async move { Ok(None) }));

        mock_repo
            .expect_create_user()
            .withf(|new_user| {
                new_user.name == "Test User"
                    && new_user.email == "test@example.com"
                    && !new_user.id.is_empty()
            })
            .times(1)
            .returning(|new_user| {
                let user = User {
                    id: new_user.id.clone(),
                    name: new_user.name.clone(),
                    email: new_user.email.clone(),
                    password_hash: new_user.password_hash.clone(),
                    created_at: Utc::now(),
                };
                Box::pin(async move { Ok(user) })
            });

        let service = UserService::new(Arc::new(mock_repo));

        let user = service
            .create_user(request("  Test User ", " test@example.com ", "password123"))
            .await
            .expect("Expected Ok result");
        assert_eq!(user.email, "test@example.com");
        assert_eq!(user.name, "Test User");
        assert_ne!(user.password_hash, "password123");
        assert!(password::verify_password("password123", &user.password_hash));
    }

    #[tokio::test]
    async fn test_create_user_reports_every_invalid_field() {
        let mock_repo = MockUserRepository::new();
        let service = UserService::new(Arc::new(mock_repo));

        let result = service.create_user(request("", "invalid-email", "short")).await;
        match result {
            Err(UserServiceError::Validation(errors)) => {
                let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["name", "email", "password"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_user_existing_email() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_email()
            .times(1)
            .returning(|email| {
                let user = User {
                    id: "existing".to_string(),
                    name: "Someone".to_string(),
                    email: email.to_string(),
                    password_hash: "hash".to_string(),
                    created_at: Utc::now(),
                };
                Box::pin(async move { Ok(Some(user)) })
            });
        mock_repo.expect_create_user().times(0);

        let service = UserService::new(Arc::new(mock_repo));

        let result = service
            .create_user(request("Test", "taken@example.com", "password123"))
            .await;
        assert!(matches!(result, Err(UserServiceError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_create_user_unique_violation_is_email_taken() {
        let mut mock_repo = MockUserRepository::new();

        // a concurrent registration won the race after our pre-check
        mock_repo
            .expect_find_by_email()
            .returning(|_| Box::pin(async move { Ok(None) }));
        mock_repo
            .expect_create_user()
            .returning(|_| Box::pin(async move { Err(RepositoryError::AlreadyExists) }));

        let service = UserService::new(Arc::new(mock_repo));

        let result = service
            .create_user(request("Test", "race@example.com", "password123"))
            .await;
        assert!(matches!(result, Err(UserServiceError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_prepare_user_assigns_id_without_writing() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_email()
            .returning(|_| Box::pin(async move { Ok(None) }));
        mock_repo.expect_create_user().times(0);

        let service = UserService::new(Arc::new(mock_repo));

        let new_user = service
            .prepare_user(request(" Ada ", "ada@example.com", "password123"))
            .await
            .unwrap();
        assert_eq!(new_user.name, "Ada");
        assert_eq!(new_user.id.len(), 36);
        assert!(password::verify_password("password123", &new_user.password_hash));
    }

    #[tokio::test]
    async fn test_get_user_missing_subject() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq("gone"))
            .returning(|_| Box::pin(async move { Ok(None) }));

        let service = UserService::new(Arc::new(mock_repo));
        assert!(matches!(
            service.get_user("gone").await,
            Err(UserServiceError::UserNotFound)
        ));
    }
}
