use crate::error::Result;
use crate::services::{dashboard_service::Dashboard, token_service::AuthenticatedUser};
use crate::AppState;
use axum::{extract::State, Extension, Json};
use chrono::Utc;

/// GET /api/dashboard - Profile, catalog size and annotated reminders
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<Dashboard>> {
    let user = state.user_service.get_user(&auth.user_id).await?;

    let dashboard = state
        .dashboard_service
        .build(user.into(), Utc::now())
        .await?;

    Ok(Json(dashboard))
}
