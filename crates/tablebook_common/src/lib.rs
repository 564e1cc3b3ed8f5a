// --- File: crates/tablebook_common/src/lib.rs ---

pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities

pub use error::{config_error, Context, TablebookError};

pub use http::{
    client::{client_for, create_client},
    error_detail,
};

pub use logging::{init, init_from_config, init_with_level, log_result};
