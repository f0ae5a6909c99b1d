use crate::models::company::Company;
use crate::AppState;
use axum::{extract::State, Json};

/// GET /api/companies
pub async fn list_companies_handler(State(state): State<AppState>) -> Json<Vec<Company>> {
    Json(state.catalog.list().await.as_ref().clone())
}
