pub mod bearer_auth;
pub mod security_headers;

pub use bearer_auth::{extract_bearer_token, require_bearer_auth, BearerError};
pub use security_headers::add_security_headers;
