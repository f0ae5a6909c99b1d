use crate::error::FieldError;
use crate::models::user::{PublicUser, User};
use crate::repositories::user_repository::UserRepository;
use crate::services::token_service::{TokenError, TokenService};
use crate::services::{password, validation};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("Invalid login input")]
    Validation(Vec<FieldError>),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Token error: {0}")]
    Token(#[from] TokenError),
    #[error("Repository error: {0}")]
    RepositoryError(#[from] crate::repositories::user_repository::RepositoryError),
}

pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A user paired with a freshly issued bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub user: PublicUser,
    pub token: String,
}

pub struct AuthService {
    user_repository: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(user_repository: Arc<dyn UserRepository>, tokens: Arc<TokenService>) -> Self {
        Self {
            user_repository,
            tokens,
        }
    }

    /// Check credentials and issue a token.
    ///
    /// An unknown email and a wrong password both come back as
    /// `InvalidCredentials`.
    pub async fn login(&self, request: LoginRequest) -> Result<AuthSession, AuthServiceError> {
        let email = request.email.trim();

        let errors = validation::validate_login(email, &request.password);
        if !errors.is_empty() {
            return Err(AuthServiceError::Validation(errors));
        }

        let user = match self.user_repository.find_by_email(email).await? {
            Some(user) => user,
            None => {
                tracing::debug!("Login rejected: no account for submitted email");
                return Err(AuthServiceError::InvalidCredentials);
            }
        };

        if !password::verify_password(&request.password, &user.password_hash) {
            tracing::debug!("Login rejected: password mismatch for user {}", user.id);
            return Err(AuthServiceError::InvalidCredentials);
        }

        let session = self.start_session(&user)?;
        tracing::info!("User logged in: {}", user.id);
        Ok(session)
    }

    fn start_session(&self, user: &User) -> Result<AuthSession, AuthServiceError> {
        let token = self.tokens.issue(&user.id)?;
        Ok(AuthSession {
            user: user.into(),
            token,
        })
    }
}
