// --- File: crates/tablebook_grid/src/error.rs ---
use tablebook_common::TablebookError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// Rejected locally, never sent to the backend.
    #[error("Validation error: {0}")]
    Validation(String),
    /// Non-2xx answer; `detail` is the backend's message, verbatim.
    #[error("{detail}")]
    Api { status: u16, detail: String },
    #[error("Booking service unreachable: {0}")]
    Transport(String),
    #[error("Failed to decode booking service response: {0}")]
    Decode(String),
    #[error("Slot index {index} out of range (0..{count})")]
    InvalidSlot { index: usize, count: usize },
    #[error("Invalid time label: {0}")]
    InvalidLabel(String),
    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),
    #[error("Unknown table: {0}")]
    UnknownTable(String),
    #[error("No booking form is open")]
    NoOpenForm,
    #[error("The open form is not an existing booking")]
    NoOpenBooking,
}

impl GridError {
    pub fn is_validation(&self) -> bool {
        matches!(self, GridError::Validation(_))
    }
}

impl From<reqwest::Error> for GridError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GridError::Decode(err.to_string())
        } else {
            GridError::Transport(err.to_string())
        }
    }
}

impl From<GridError> for TablebookError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::Validation(msg) => TablebookError::ValidationError(msg),
            GridError::Api { status, detail } => TablebookError::ApiError { status, detail },
            GridError::Transport(msg) => TablebookError::HttpError(msg),
            GridError::Decode(msg) => TablebookError::ParseError(msg),
            GridError::InvalidSchedule(msg) => TablebookError::ConfigError(msg),
            other => TablebookError::InternalError(other.to_string()),
        }
    }
}
