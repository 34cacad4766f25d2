//! Runtime configuration from environment variables (a `.env` file is loaded first by the binary).

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/lunchly";
pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Which store backs the models.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    /// In-process, lost on exit.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(ConfigError::Invalid {
                key: "LUNCHLY_STORE",
                value: s.to_string(),
                reason: "expected postgres or memory".into(),
            }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: SocketAddr,
    pub max_connections: u32,
    pub store: StoreBackend,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());

        let addr = lookup("LUNCHLY_ADDR").unwrap_or_else(|| DEFAULT_ADDR.into());
        let listen_addr: SocketAddr = addr.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
            key: "LUNCHLY_ADDR",
            value: addr.clone(),
            reason: e.to_string(),
        })?;

        let max_connections = match lookup("LUNCHLY_MAX_CONNECTIONS") {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "LUNCHLY_MAX_CONNECTIONS",
                        value: raw,
                        reason: "must be a positive integer".into(),
                    })
                }
            },
        };

        let store = match lookup("LUNCHLY_STORE") {
            Some(raw) => raw.parse()?,
            None => StoreBackend::Postgres,
        };

        Ok(Config {
            database_url,
            listen_addr,
            max_connections,
            store,
        })
    }
}
