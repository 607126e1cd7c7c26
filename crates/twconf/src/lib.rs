//! Loader for Tailwind-style build configuration.
//!
//! A project describes its CSS build in a single config file: which files to
//! scan for class names, how to extend the default theme, which plugins to
//! activate and the options those plugins read. This crate turns that file
//! into an immutable [`TailwindConfig`] for the build tool to consume.
//!
//! ```no_run
//! let config = twconf::load("tailwind.config.js")?;
//! for plugin in config.plugin_activations() {
//!     println!("{}", plugin.name);
//! }
//! # Ok::<(), twconf::ConfigError>(())
//! ```

pub mod content;
pub mod descriptor;
pub mod discovery;
pub mod error;
pub mod loader;
pub mod plugin;
pub mod schema;
pub mod source;
pub mod validation;

// Re-export main types
pub use content::ContentMatcher;
pub use descriptor::*;
pub use error::*;
pub use loader::load;
pub use plugin::{PluginReference, PluginRegistry};
pub use source::SourceFormat;

// Re-export discovery and validation
pub use discovery::{CONFIG_FILE_NAMES, ConfigDiscovery, discover};
pub use validation::{ConfigValidator, FsValidator, SchemaValidator, validate_fs, validate_schema};
