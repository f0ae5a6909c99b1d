pub mod auth_handlers;
pub mod company_handlers;
pub mod dashboard_handlers;
pub mod json_body;
pub mod reminder_handlers;

pub use auth_handlers::{login_handler, me_handler, register_handler};
pub use company_handlers::list_companies_handler;
pub use dashboard_handlers::dashboard_handler;
pub use json_body::JsonBody;
pub use reminder_handlers::{
    create_reminder_handler, delete_reminder_handler, get_reminder_handler,
    list_reminders_handler, update_reminder_handler,
};

pub async fn health_handler() -> &'static str {
    "ok"
}
