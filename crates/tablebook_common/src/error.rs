// --- File: crates/tablebook_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type shared by the tablebook crates.
///
/// Crates with their own error enum convert into this one at process boundaries.
#[derive(Error, Debug)]
pub enum TablebookError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The booking backend rejected a request
    #[error("Booking service error: {status} - {detail}")]
    ApiError { status: u16, detail: String },

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Adds context to foreign errors while converting them.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, TablebookError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds context to an error with a lazy context provider.
    fn with_context<C, F>(self, f: F) -> Result<T, TablebookError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, TablebookError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| TablebookError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, TablebookError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| TablebookError::InternalError(format!("{}: {}", f(), error)))
    }
}

impl From<reqwest::Error> for TablebookError {
    fn from(err: reqwest::Error) -> Self {
        TablebookError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for TablebookError {
    fn from(err: serde_json::Error) -> Self {
        TablebookError::ParseError(err.to_string())
    }
}

impl From<config::ConfigError> for TablebookError {
    fn from(err: config::ConfigError) -> Self {
        TablebookError::ConfigError(err.to_string())
    }
}

pub fn config_error<T: fmt::Display>(message: T) -> TablebookError {
    TablebookError::ConfigError(message.to_string())
}
