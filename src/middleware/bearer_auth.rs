use crate::{error::AppError, services::token_service::TokenError, AppState};
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

#[derive(Debug, PartialEq, Eq)]
pub enum BearerError {
    MissingAuthorizationHeader,
    InvalidAuthorizationFormat,
}

/// Extract Bearer token from Authorization header
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, BearerError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or(BearerError::MissingAuthorizationHeader)?
        .to_str()
        .map_err(|_| BearerError::InvalidAuthorizationFormat)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or(BearerError::InvalidAuthorizationFormat)?;

    if token.is_empty() {
        return Err(BearerError::InvalidAuthorizationFormat);
    }

    Ok(token)
}

/// Gate for protected routes.
///
/// On success the verified `AuthenticatedUser` is attached to the request
/// extensions. Every failure is answered with the same 401; the reason is
/// only logged.
pub async fn require_bearer_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = match extract_bearer_token(request.headers()) {
        Ok(token) => token,
        Err(err) => {
            tracing::debug!("Rejected request to {}: {:?}", request.uri().path(), err);
            return Err(AppError::Unauthenticated);
        }
    };

    let authenticated = match state.token_service.verify(token) {
        Ok(authenticated) => authenticated,
        Err(TokenError::Expired) => {
            tracing::debug!("Rejected expired token on {}", request.uri().path());
            return Err(AppError::Unauthenticated);
        }
        Err(err) => {
            tracing::warn!("Rejected token on {}: {}", request.uri().path(), err);
            return Err(AppError::Unauthenticated);
        }
    };

    tracing::Span::current().record("user_id", authenticated.user_id.as_str());
    request.extensions_mut().insert(authenticated);

    Ok(next.run(request).await)
}
