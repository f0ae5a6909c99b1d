pub mod auth;
pub mod server;

pub use auth::{validate_production_config, AuthConfig};
pub use server::ServerConfig;

pub(crate) fn current_environment() -> String {
    std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string())
}

pub(crate) fn is_production() -> bool {
    current_environment() == "production"
}
