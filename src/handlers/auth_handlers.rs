use crate::error::Result;
use crate::handlers::json_body::JsonBody;
use crate::models::user::PublicUser;
use crate::services::{
    auth_service::{AuthSession, LoginRequest},
    token_service::AuthenticatedUser,
    user_service::CreateUserRequest,
};
use crate::AppState;
use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct RegisterBody {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

/// POST /api/auth/register
///
/// The token is signed before the account is written, so a signing failure
/// leaves no orphaned account behind.
pub async fn register_handler(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterBody>,
) -> Result<(StatusCode, Json<AuthSession>)> {
    let new_user = state
        .user_service
        .prepare_user(CreateUserRequest {
            name: body.name,
            email: body.email,
            password: body.password,
        })
        .await?;

    let token = state.token_service.issue(&new_user.id)?;
    let user = state.user_service.insert_user(&new_user).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthSession {
            user: user.into(),
            token,
        }),
    ))
}

/// POST /api/auth/login
pub async fn login_handler(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginBody>,
) -> Result<Json<AuthSession>> {
    let session = state
        .auth_service
        .login(LoginRequest {
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok(Json(session))
}

/// GET /api/auth/me
pub async fn me_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<PublicUser>> {
    let user = state.user_service.get_user(&auth.user_id).await?;
    Ok(Json(user.into()))
}
