//! Logging utilities for the tablebook crates.
//!
//! Every crate logs through `tracing` macros; binaries call one of the
//! initializers here once at startup.

use std::str::FromStr;

use tablebook_config::AppConfig;
use tracing::{info, warn, Level};
use tracing_subscriber::{filter::Directive, fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO.
///
/// # Examples
///
/// ```
/// use tablebook_common::logging;
///
/// logging::init();
/// logging::init_with_level(tracing::Level::DEBUG); // no-op, already initialized
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific level for the `tablebook*` targets.
///
/// `RUST_LOG` directives are honored as well. Calling this more than once is harmless.
pub fn init_with_level(level: Level) {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = Directive::from_str(&format!("tablebook={}", level)) {
        filter = filter.add_directive(directive);
    }

    // try_init: a global subscriber may already be set (tests, embedding apps)
    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Initialize from the `log_level` configuration value, falling back to INFO.
pub fn init_from_config(config: &AppConfig) {
    match Level::from_str(&config.log_level) {
        Ok(level) => init_with_level(level),
        Err(_) => {
            init();
            warn!("Unknown log_level {:?}, using info", config.log_level);
        }
    }
}

/// Log a result, with different messages for success and error cases.
///
/// Returns the result unchanged so it can be used in a chain.
pub fn log_result<T, E: std::fmt::Display>(
    result: Result<T, E>,
    success_message: &str,
    error_context: &str,
) -> Result<T, E> {
    match &result {
        Ok(_) => info!("{}", success_message),
        Err(e) => tracing::error!("{}: {}", error_context, e),
    }
    result
}
