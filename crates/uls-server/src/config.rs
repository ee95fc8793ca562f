// ABOUTME: Configuration loading for the uls server.
// ABOUTME: Reads the data directory and bind address from environment variables with defaults.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_BIND: &str = "0.0.0.0:5000";

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ULS_BIND is not a valid socket address: {0}")]
    InvalidBind(String),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct UlsConfig {
    pub home: PathBuf,
    pub bind: SocketAddr,
}

impl UlsConfig {
    /// Load configuration from the process environment.
    ///
    /// Environment variables:
    /// - ULS_HOME: data directory (default: ~/.uls)
    /// - ULS_BIND: socket address to bind (default: 0.0.0.0:5000)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let home = lookup("ULS_HOME")
            .filter(|h| !h.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                lookup("HOME")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
                    .join(".uls")
            });

        let bind_str = lookup("ULS_BIND")
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind: SocketAddr = bind_str
            .parse()
            .map_err(|_| ConfigError::InvalidBind(bind_str))?;

        Ok(Self { home, bind })
    }
}
