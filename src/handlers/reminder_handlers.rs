use crate::error::Result;
use crate::handlers::json_body::JsonBody;
use crate::models::reminder::{Reminder, ReminderRequest};
use crate::services::token_service::AuthenticatedUser;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

/// GET /api/reminders - List the caller's reminders
pub async fn list_reminders_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<Reminder>>> {
    let reminders = state.reminder_service.list(&auth.user_id).await?;
    Ok(Json(reminders))
}

/// GET /api/reminders/{id}
pub async fn get_reminder_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<Reminder>> {
    let reminder = state.reminder_service.get(&id, &auth.user_id).await?;
    Ok(Json(reminder))
}

/// POST /api/reminders
pub async fn create_reminder_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    JsonBody(body): JsonBody<ReminderRequest>,
) -> Result<(StatusCode, Json<Reminder>)> {
    let reminder = state.reminder_service.create(&auth.user_id, &body).await?;
    Ok((StatusCode::CREATED, Json(reminder)))
}

/// PUT /api/reminders/{id} - Replace fields and reschedule
pub async fn update_reminder_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<ReminderRequest>,
) -> Result<Json<Reminder>> {
    let reminder = state
        .reminder_service
        .update(&id, &auth.user_id, &body)
        .await?;
    Ok(Json(reminder))
}

/// DELETE /api/reminders/{id}
pub async fn delete_reminder_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.reminder_service.delete(&id, &auth.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
