pub mod auth_service;
pub mod company_catalog;
pub mod dashboard_service;
pub mod password;
pub mod reminder_service;
pub mod scheduler;
pub mod token_service;
pub mod user_service;
pub mod validation;

pub use auth_service::{AuthService, AuthServiceError, AuthSession, LoginRequest};
pub use company_catalog::{CatalogError, CompanyCatalog};
pub use dashboard_service::{Dashboard, DashboardReminder, DashboardService};
pub use reminder_service::{ReminderService, ReminderServiceError};
pub use scheduler::{compute_next_send, effective_days, ScheduleError};
pub use token_service::{AuthenticatedUser, TokenError, TokenService};
pub use user_service::{CreateUserRequest, UserService, UserServiceError};
