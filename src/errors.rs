//! Unified error types and result handling.

use thiserror::Error;

/// Every failure the storage layer and HTTP API can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// The database rejected a query or could not be reached
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An environment variable is set but unusable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Client-supplied input failed validation
    #[error("{message}")]
    Validation {
        /// Human-readable reason
        message: String,
        /// Name of the offending field, when one can be singled out
        field: Option<String>,
    },

    #[error("Seed not found: {id}")]
    SeedNotFound {
        /// Requested seed id
        id: i32,
    },

    #[error("Achievement not found: {id}")]
    AchievementNotFound {
        /// Requested achievement id
        id: i32,
    },

    #[error("User not found: {id}")]
    UserNotFound {
        /// Requested user id
        id: String,
    },

    /// The request carries no authenticated identity
    #[error("Unauthorized")]
    Unauthorized,
}

impl Error {
    /// Builds a validation error tied to a request field.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.to_string()),
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
