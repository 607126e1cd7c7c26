//! Command implementations for the twconf CLI.
//!
//! - [`check`] - Configuration validation
//! - [`show`] - Print the loaded configuration
//!
//! Each command provides an `execute` function that takes the parsed
//! command arguments and returns a Result.

pub mod check;
pub mod show;

use std::path::PathBuf;

use twconf::{ConfigDiscovery, ConfigError, TailwindConfig};

use crate::error::Result;
use crate::settings::Settings;

// Re-export execute functions for convenience
pub use check::execute as check_execute;
pub use show::execute as show_execute;

/// Load the config named by the settings, or discover one under the root.
pub(crate) fn load_config(settings: &Settings) -> Result<(PathBuf, TailwindConfig)> {
    let path = match &settings.config {
        Some(path) => path.clone(),
        None => ConfigDiscovery::new(&settings.root)
            .find()
            .ok_or(ConfigError::NotFound)?,
    };

    let config = twconf::load(&path)?;
    Ok((path, config))
}
