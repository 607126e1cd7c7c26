//! Error handling for the twconf CLI.
//!
//! Library errors keep their miette diagnostics (codes, help text, source
//! spans) all the way to the terminal; everything else is reported as a
//! plain message.

use miette::Report;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading, validating or resolving the config failed
    #[error(transparent)]
    Config(#[from] twconf::ConfigError),

    /// CLI settings could not be assembled from defaults, environment and flags
    #[error("Invalid settings: {0}\n\nHint: Check TWCONF_* environment variables")]
    Settings(#[from] Box<figment::Error>),

    /// Writing the config as JSON failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the config as TOML failed
    #[error("TOML error: {0}\n\nHint: TOML cannot represent null values; use --format json")]
    Toml(#[from] toml::ser::Error),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => Report::new(e),
        _ => miette::miette!("{}", err),
    }
}
