//! HTTP server settings read from environment variables.

use crate::errors::{Error, Result};
use std::net::SocketAddr;

/// Address the API listens on when `BIND_ADDRESS` is not set.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";

/// Path of the catalog file when `CONFIG_PATH` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Runtime settings for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    /// Socket address to bind
    pub bind_address: SocketAddr,
    /// Path of the TOML file holding the achievement catalog
    pub config_path: String,
    /// Database connection URL
    pub database_url: String,
}

impl ServerSettings {
    /// Reads `BIND_ADDRESS`, `CONFIG_PATH`, and `DATABASE_URL`, falling back to defaults.
    ///
    /// # Errors
    /// Returns an error if a variable is not valid Unicode or `BIND_ADDRESS` is not a
    /// valid socket address.
    pub fn from_env() -> Result<Self> {
        let bind_address = super::env_or_default("BIND_ADDRESS", DEFAULT_BIND_ADDRESS)?;
        let config_path = super::env_or_default("CONFIG_PATH", DEFAULT_CONFIG_PATH)?;

        Ok(Self {
            bind_address: parse_bind_address(&bind_address)?,
            config_path,
            database_url: super::database::get_database_url()?,
        })
    }
}

fn parse_bind_address(value: &str) -> Result<SocketAddr> {
    value.parse().map_err(|e| Error::Config {
        message: format!("Invalid BIND_ADDRESS '{value}': {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bind_address() {
        let addr = parse_bind_address("127.0.0.1:8080");
        assert!(matches!(addr, Ok(a) if a.port() == 8080));

        assert!(matches!(
            parse_bind_address("localhost"),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn test_default_bind_address_is_valid() {
        assert!(parse_bind_address(DEFAULT_BIND_ADDRESS).is_ok());
    }
}
