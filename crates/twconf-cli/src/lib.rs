//! twconf CLI - inspect and validate Tailwind CSS configuration.
//!
//! The CLI is organized into several key modules:
//!
//! - [`cli`] - clap argument definitions
//! - [`commands`] - `check` and `show` implementations
//! - [`error`] - CLI error type and miette conversion
//! - [`logger`] - Structured logging with tracing
//! - [`settings`] - figment-layered settings (defaults, `TWCONF_*`, flags)
//! - [`ui`] - Status messages

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod settings;
pub mod ui;

// Re-export commonly used types
pub use error::{CliError, Result};
