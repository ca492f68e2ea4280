/// Database configuration and connection management
pub mod database;

/// Achievement catalog loading from config.toml
pub mod achievements;

/// HTTP server settings from environment variables
pub mod server;

use crate::errors::Result;
use std::env::VarError;

/// Reads `name` from the environment, falling back to `default` when it is unset.
///
/// # Errors
/// Returns [`crate::errors::Error::EnvVar`] when the variable is set but not valid Unicode.
pub fn env_or_default(name: &str, default: &str) -> Result<String> {
    or_default(std::env::var(name), default)
}

fn or_default(value: std::result::Result<String, VarError>, default: &str) -> Result<String> {
    match value {
        Ok(value) => Ok(value),
        Err(VarError::NotPresent) => Ok(default.to_string()),
        Err(e) => Err(e.into()),
    }
}
