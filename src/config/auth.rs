use std::env;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::warn;

use super::{current_environment, is_production};

const MIN_SECRET_BYTES: usize = 32;

/// Token signing configuration.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: Vec<u8>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .finish()
    }
}

impl AuthConfig {
    pub fn from_env() -> Self {
        AuthConfig {
            jwt_secret: load_jwt_secret(),
        }
    }
}

/// Refuse to start in production with a missing, short or placeholder
/// signing secret.
pub fn validate_production_config() {
    if !is_production() {
        return;
    }

    let secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set in production");
    let decoded_secret = decode_secret_bytes(&secret);

    if decoded_secret.len() < MIN_SECRET_BYTES {
        panic!(
            "FATAL: JWT_SECRET must be at least {} bytes in production",
            MIN_SECRET_BYTES
        );
    }

    let lowered = secret.to_ascii_lowercase();
    if lowered.contains("example")
        || lowered.contains("changeme")
        || lowered.contains("default")
        || lowered.contains("your-secret")
    {
        panic!("FATAL: JWT_SECRET appears to be a default value. Generate a secure secret!");
    }
}

fn load_jwt_secret() -> Vec<u8> {
    match env::var("JWT_SECRET") {
        Ok(secret) if !secret.is_empty() => {
            let bytes = decode_secret_bytes(&secret);
            if bytes.len() < MIN_SECRET_BYTES {
                warn!(
                    "JWT_SECRET is shorter than {} bytes; stretching it ({} environment)",
                    MIN_SECRET_BYTES,
                    current_environment()
                );
                Sha256::digest(&bytes).to_vec()
            } else {
                bytes
            }
        }
        _ => {
            warn!("JWT_SECRET not set; generating ephemeral secret (development only)");
            let mut bytes = vec![0u8; 64];
            rand::thread_rng().fill_bytes(&mut bytes);
            bytes
        }
    }
}

fn decode_secret_bytes(secret: &str) -> Vec<u8> {
    STANDARD
        .decode(secret.as_bytes())
        .unwrap_or_else(|_| secret.as_bytes().to_vec())
}
