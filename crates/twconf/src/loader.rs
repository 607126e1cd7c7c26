//! One-shot loading of a config file into a [`TailwindConfig`].

use std::fs;
use std::path::Path;

use crate::descriptor::TailwindConfig;
use crate::error::{ConfigError, Result};
use crate::source::SourceFormat;

/// Load and validate the config file at `path`.
///
/// The format is picked from the file name (`.js`/`.cjs`/`.mjs`/`.ts`,
/// `.json`, `.toml` or `package.json`). The file is read once; a malformed
/// source never yields a partially populated config.
///
/// # Errors
///
/// - `ConfigError::UnsupportedFormat` for an unrecognized file name
/// - `ConfigError::ReadFailed` if the file cannot be read
/// - `ConfigError::Syntax` if the source cannot be parsed
/// - `ConfigError::Malformed` if a field is missing or has the wrong type
///
/// # Example
///
/// ```no_run
/// let config = twconf::load("tailwind.config.js")?;
/// for pattern in config.content_patterns() {
///     println!("scanning {pattern}");
/// }
/// # Ok::<(), twconf::ConfigError>(())
/// ```
pub fn load(path: impl AsRef<Path>) -> Result<TailwindConfig> {
    let path = path.as_ref();
    let format = SourceFormat::from_path(path)
        .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;

    tracing::debug!("Loading {:?} config from: {}", format, path.display());

    let source = fs::read_to_string(path).map_err(|e| ConfigError::read_failed(path, e))?;
    let config = TailwindConfig::from_source(&source, format, &path.display().to_string())?;

    tracing::debug!(
        patterns = config.content_patterns().len(),
        plugins = config.plugins.len(),
        "Loaded config from {}",
        path.display()
    );

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn rejects_unknown_extension() {
        let err = load("tailwind.config.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn reports_unreadable_file() {
        let dir = TempDir::new().unwrap();
        let err = load(dir.path().join("tailwind.config.js")).unwrap_err();
        match err {
            ConfigError::ReadFailed { path, .. } => assert!(path.ends_with("tailwind.config.js")),
            other => panic!("expected ReadFailed, got {other:?}"),
        }
    }

    #[test]
    fn loads_js_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tailwind.config.js");
        fs::write(
            &path,
            r#"module.exports = { content: ["./index.html"], plugins: [require("daisyui")] }"#,
        )
        .unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.content_patterns(), ["./index.html"]);
        assert_eq!(config.plugins[0].name, "daisyui");
    }
}
