//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SOLUTIC_DATABASE_URL` - `SQLite` connection string
//!   (e.g., `sqlite://customers.db`)
//!
//! ## Optional
//! - `SOLUTIC_HOST` - Bind address (default: 127.0.0.1)
//! - `SOLUTIC_PORT` - Listen port (default: 3000)

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `SQLite` database connection URL
    pub database_url: String,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = env::var("SOLUTIC_DATABASE_URL")
            .map_err(|_| ConfigError::MissingEnvVar("SOLUTIC_DATABASE_URL".to_owned()))?;

        let host = match env::var("SOLUTIC_HOST") {
            Ok(value) => value.parse::<IpAddr>().map_err(|e| {
                ConfigError::InvalidEnvVar("SOLUTIC_HOST".to_owned(), e.to_string())
            })?,
            Err(_) => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };

        let port = match env::var("SOLUTIC_PORT") {
            Ok(value) => value.parse::<u16>().map_err(|e| {
                ConfigError::InvalidEnvVar("SOLUTIC_PORT".to_owned(), e.to_string())
            })?,
            Err(_) => 3000,
        };

        Ok(Self {
            database_url,
            host,
            port,
        })
    }

    /// The socket address to bind the server to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
