use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid HOST {0:?}")]
    InvalidHost(String),
    #[error("Invalid PORT {0:?}")]
    InvalidPort(String),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub companies_csv: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
        let companies_csv = env::var("COMPANIES_CSV").unwrap_or_else(|_| "companies.csv".to_string());

        Ok(ServerConfig {
            host: host.parse().map_err(|_| ConfigError::InvalidHost(host.clone()))?,
            port: port.parse().map_err(|_| ConfigError::InvalidPort(port.clone()))?,
            companies_csv: PathBuf::from(companies_csv),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }
}
