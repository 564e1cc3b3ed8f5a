// --- File: crates/tablebook_common/src/http/client.rs ---
use reqwest::{Client, Error as ReqwestError};
use std::time::Duration;
use tablebook_config::ApiConfig;

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Creates a new HTTP client with the given request timeout.
///
/// A timeout of zero falls back to [`DEFAULT_TIMEOUT_SECS`].
pub fn create_client(timeout_secs: u64) -> Result<Client, ReqwestError> {
    let timeout_secs = if timeout_secs == 0 {
        DEFAULT_TIMEOUT_SECS
    } else {
        timeout_secs
    };
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}

/// Creates the client used to talk to the booking backend.
pub fn client_for(config: &ApiConfig) -> Result<Client, ReqwestError> {
    create_client(config.timeout_secs)
}
