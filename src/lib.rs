pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

// Make test_utils available for both unit tests and integration tests
pub mod test_utils;

use std::sync::Arc;

use repositories::{ReminderRepository, UserRepository};
use services::{
    AuthService, CompanyCatalog, DashboardService, ReminderService, TokenService, UserService,
};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub auth_service: Arc<AuthService>,
    pub token_service: Arc<TokenService>,
    pub reminder_service: Arc<ReminderService>,
    pub dashboard_service: Arc<DashboardService>,
    pub catalog: Arc<CompanyCatalog>,
}

impl AppState {
    /// Wire services over the given stores, catalog and signing secret.
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        reminder_repository: Arc<dyn ReminderRepository>,
        catalog: Arc<CompanyCatalog>,
        jwt_secret: &[u8],
    ) -> Self {
        let token_service = Arc::new(TokenService::new(jwt_secret));
        let user_service = Arc::new(UserService::new(user_repository.clone()));
        let auth_service = Arc::new(AuthService::new(user_repository, token_service.clone()));
        let reminder_service = Arc::new(ReminderService::new(
            reminder_repository,
            catalog.clone(),
        ));
        let dashboard_service = Arc::new(DashboardService::new(
            reminder_service.clone(),
            catalog.clone(),
        ));

        AppState {
            user_service,
            auth_service,
            token_service,
            reminder_service,
            dashboard_service,
            catalog,
        }
    }
}
