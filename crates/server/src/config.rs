//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CHAINWAIT_HOST` - Bind address (default: 127.0.0.1)
//! - `CHAINWAIT_PORT` - Listen port (default: 3000)
//! - `CHAINWAIT_STORAGE` - Storage backend, `csv` or `sqlite` (default: csv)
//! - `CHAINWAIT_DATA_DIR` - Directory for CSV files (default: ./data)
//! - `CHAINWAIT_DATABASE_URL` - SQLite connection string for the table
//!   backend, with fallback to the generic `DATABASE_URL`
//!   (default: sqlite://chainwait.db?mode=rwc)
//! - `GOOGLE_CLIENT_ID` - OAuth client ID for Google signups; when unset the
//!   `/signup/google` endpoint rejects every assertion

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which storage backend the store is built on.
///
/// The two variants implement the same store contract; the backend is a
/// deployment choice, not a behavioral one.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// Three append-only CSV files under a data directory.
    Csv {
        /// Directory holding `emails.csv`, `user_feedback.csv`, and
        /// `seller_feedback.csv`.
        data_dir: PathBuf,
    },
    /// SQLite tables with a uniqueness constraint on email.
    Sqlite {
        /// SQLite connection string (may embed a filesystem path).
        database_url: SecretString,
    },
}

/// Waitlist server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Storage backend selection.
    pub storage: StorageConfig,
    /// Google OAuth client ID for assertion verification.
    pub google_client_id: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("CHAINWAIT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("CHAINWAIT_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("CHAINWAIT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("CHAINWAIT_PORT".to_string(), e.to_string()))?;

        let storage = storage_from_env()?;
        let google_client_id = get_optional_env("GOOGLE_CLIENT_ID");

        Ok(Self {
            host,
            port,
            storage,
            google_client_id,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn storage_from_env() -> Result<StorageConfig, ConfigError> {
    let backend = get_env_or_default("CHAINWAIT_STORAGE", "csv");
    match backend.as_str() {
        "csv" => Ok(StorageConfig::Csv {
            data_dir: PathBuf::from(get_env_or_default("CHAINWAIT_DATA_DIR", "./data")),
        }),
        "sqlite" => Ok(StorageConfig::Sqlite {
            database_url: get_database_url(),
        }),
        other => Err(ConfigError::InvalidEnvVar(
            "CHAINWAIT_STORAGE".to_string(),
            format!("expected 'csv' or 'sqlite', got '{other}'"),
        )),
    }
}

/// Get the database URL with fallback to the generic `DATABASE_URL`.
fn get_database_url() -> SecretString {
    if let Ok(value) = std::env::var("CHAINWAIT_DATABASE_URL") {
        return SecretString::from(value);
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return SecretString::from(value);
    }
    SecretString::from("sqlite://chainwait.db?mode=rwc")
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            storage: StorageConfig::Csv {
                data_dir: PathBuf::from("./data"),
            },
            google_client_id: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_env_or_default_fallback() {
        assert_eq!(
            get_env_or_default("CHAINWAIT_TEST_UNSET_VAR", "fallback"),
            "fallback"
        );
    }
}
