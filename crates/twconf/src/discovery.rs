//! File-based config discovery for CLI use
//!
//! Handles finding and loading Tailwind configuration files from the filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::descriptor::TailwindConfig;
use crate::error::{ConfigError, Result};
use crate::loader;
use crate::source::PACKAGE_JSON_FIELD;

/// Conventional config file names, in lookup order.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    "tailwind.config.js",
    "tailwind.config.cjs",
    "tailwind.config.mjs",
    "tailwind.config.ts",
    "tailwind.config.json",
    "tailwind.toml",
];

/// File-based configuration discovery
///
/// Searches for configuration files in conventional locations and loads them.
/// Library users holding a source in memory should use
/// `TailwindConfig::from_source()` directly.
///
/// # Example
///
/// ```no_run
/// use twconf::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new(".");
/// let config = discovery.load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    /// Create a new config discovery with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find a config file in the root directory
    ///
    /// Searches [`CONFIG_FILE_NAMES`] in order, then `package.json` with a
    /// non-null `tailwind` field.
    pub fn find(&self) -> Option<PathBuf> {
        for name in CONFIG_FILE_NAMES {
            let path = self.root.join(name);
            if path.is_file() {
                tracing::trace!("Found config file: {}", path.display());
                return Some(path);
            }
        }

        let pkg_path = self.root.join("package.json");
        let content = fs::read_to_string(&pkg_path).ok()?;
        let parsed: Value = serde_json::from_str(&content).ok()?;
        parsed
            .get(PACKAGE_JSON_FIELD)
            .is_some_and(|field| !field.is_null())
            .then_some(pkg_path)
    }

    /// Load config from discovered file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<TailwindConfig> {
        let path = self.find().ok_or(ConfigError::NotFound)?;
        loader::load(path)
    }
}

/// Discover and load config from current directory (convenience function)
///
/// # Example
///
/// ```no_run
/// use twconf::discover;
///
/// let config = discover().unwrap();
/// ```
pub fn discover() -> Result<TailwindConfig> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load()
}
