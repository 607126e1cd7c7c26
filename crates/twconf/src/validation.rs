//! Pluggable config validation strategies
//!
//! Separates filesystem validation (for CLI use) from schema validation (for library use).

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;

use crate::content::ContentMatcher;
use crate::descriptor::TailwindConfig;
use crate::error::{ConfigError, Result};

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    /// Validate a loaded descriptor
    fn validate(&self, config: &TailwindConfig) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// Use this when the content files are in-memory or virtual.
///
/// # Example
///
/// ```
/// use twconf::{ConfigValidator, SchemaValidator, TailwindConfig};
/// use serde_json::json;
///
/// let config = TailwindConfig::from_value(json!({ "content": ["index.html"] })).unwrap();
/// SchemaValidator.validate(&config).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &TailwindConfig) -> Result<()> {
        for (index, pattern) in config.content_patterns().iter().enumerate() {
            if pattern.trim().is_empty() || pattern.trim() == "!" {
                return Err(ConfigError::malformed(
                    format!("content[{index}]"),
                    "content patterns cannot be blank",
                ));
            }
        }

        let mut seen = FxHashSet::default();
        for (index, plugin) in config.plugins.iter().enumerate() {
            if plugin.name.trim().is_empty() {
                return Err(ConfigError::malformed(
                    format!("plugins[{index}].name"),
                    "plugin names cannot be blank",
                ));
            }

            // Activating the same plugin twice registers its utilities twice
            if !seen.insert(plugin.name.as_str()) {
                return Err(ConfigError::malformed(
                    format!("plugins[{index}]"),
                    format!("plugin `{}` is activated more than once", plugin.name),
                ));
            }
        }

        for (index, preset) in config.presets.iter().enumerate() {
            if preset.name.trim().is_empty() {
                return Err(ConfigError::malformed(
                    format!("presets[{index}].name"),
                    "preset names cannot be blank",
                ));
            }
        }

        if config.prefix.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err(ConfigError::malformed(
                "prefix",
                "remove `prefix` instead of setting it to an empty string",
            ));
        }

        if config.separator.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err(ConfigError::malformed("separator", "separator cannot be blank"));
        }

        Ok(())
    }
}

/// Filesystem validator (for CLI use)
///
/// Runs the schema checks, then requires every non-negated content pattern
/// to select at least one file under the root.
///
/// # Example
///
/// ```no_run
/// use twconf::{ConfigValidator, FsValidator};
///
/// let config = twconf::load("tailwind.config.js").unwrap();
/// FsValidator::new(".").validate(&config).unwrap();
/// ```
pub struct FsValidator {
    root: PathBuf,
}

impl FsValidator {
    /// Create a new filesystem validator with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, config: &TailwindConfig) -> Result<()> {
        SchemaValidator.validate(config)?;

        let matcher = ContentMatcher::new(&self.root, config.content_patterns())?;
        for (pattern, count) in matcher.matches_per_pattern()? {
            tracing::trace!(count, "Content pattern {pattern}");
            if count == 0 {
                return Err(ConfigError::ContentUnmatched { pattern });
            }
        }

        Ok(())
    }
}

/// Convenience function for schema-only validation
pub fn validate_schema(config: &TailwindConfig) -> Result<()> {
    SchemaValidator.validate(config)
}

/// Convenience function for filesystem validation
pub fn validate_fs(config: &TailwindConfig, root: impl AsRef<Path>) -> Result<()> {
    FsValidator::new(root).validate(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::fs;
    use tempfile::TempDir;

    fn config(value: Value) -> TailwindConfig {
        TailwindConfig::from_value(value).unwrap()
    }

    #[test]
    fn schema_validator_accepts_valid_config() {
        let config = config(json!({
            "content": ["./static-files/**/*.{html,js}"],
            "plugins": ["daisyui"],
            "daisyui": { "themes": ["light"] }
        }));
        assert!(SchemaValidator.validate(&config).is_ok());
    }

    #[test]
    fn schema_validator_rejects_blank_pattern() {
        let config = config(json!({ "content": ["./src/**/*.html", "   "] }));
        let err = SchemaValidator.validate(&config).unwrap_err();
        assert_eq!(err.field(), Some("content[1]"));
    }

    #[test]
    fn schema_validator_rejects_duplicate_activation() {
        let config = config(json!({
            "content": ["a.html"],
            "plugins": ["daisyui", { "name": "daisyui", "args": {} }]
        }));
        let err = SchemaValidator.validate(&config).unwrap_err();
        assert_eq!(err.field(), Some("plugins[1]"));
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn schema_validator_rejects_blank_prefix_and_separator() {
        let err = validate_schema(&config(json!({ "content": ["a.html"], "prefix": "" })))
            .unwrap_err();
        assert_eq!(err.field(), Some("prefix"));

        let err = validate_schema(&config(json!({ "content": ["a.html"], "separator": " " })))
            .unwrap_err();
        assert_eq!(err.field(), Some("separator"));
    }

    #[test]
    fn fs_validator_accepts_matching_patterns() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("static-files")).unwrap();
        fs::write(dir.path().join("static-files/index.html"), "").unwrap();

        let config = config(json!({
            "content": ["./static-files/**/*.{html,js}", "!./static-files/vendor/**"]
        }));
        assert!(validate_fs(&config, dir.path()).is_ok());
    }

    #[test]
    fn fs_validator_reports_unmatched_pattern() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), "").unwrap();

        let config = config(json!({ "content": ["./index.html", "./templates/**/*.html"] }));
        let err = FsValidator::new(dir.path()).validate(&config).unwrap_err();
        match err {
            ConfigError::ContentUnmatched { pattern } => {
                assert_eq!(pattern, "./templates/**/*.html")
            }
            other => panic!("expected ContentUnmatched, got {other:?}"),
        }
    }

    #[test]
    fn fs_validator_runs_schema_checks_first() {
        let dir = TempDir::new().unwrap();
        let config = config(json!({ "content": [""] }));
        let err = validate_fs(&config, dir.path()).unwrap_err();
        assert!(err.is_malformed());
    }
}
