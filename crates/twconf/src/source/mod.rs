//! Readers that turn a config source into a generic value tree.
//!
//! Every reader produces a `serde_json::Value` so that shape checking and
//! typed deserialization run identically regardless of the source format.

mod js;

use std::path::Path;

use serde_json::Value;

use crate::error::{ConfigError, Result, offset_of};

pub use js::parse_module;

/// Field of `package.json` that carries the configuration.
pub const PACKAGE_JSON_FIELD: &str = "tailwind";

/// Encoding of a configuration source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Declarative CommonJS / ES module (`tailwind.config.js` and friends)
    Js,
    /// Plain JSON object (`tailwind.config.json`)
    Json,
    /// TOML document (`tailwind.toml`)
    Toml,
    /// The `tailwind` field of a `package.json`
    PackageJson,
}

impl SourceFormat {
    /// Pick a format from a file name.
    pub fn from_path(path: &Path) -> Option<Self> {
        if path.file_name().is_some_and(|name| name == "package.json") {
            return Some(Self::PackageJson);
        }

        match path.extension()?.to_str()? {
            "js" | "cjs" | "mjs" | "ts" | "cts" | "mts" => Some(Self::Js),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Parse `source` into a value tree. `name` is used in diagnostics.
pub fn parse_source(source: &str, format: SourceFormat, name: &str) -> Result<Value> {
    match format {
        SourceFormat::Js => parse_module(source, name),
        SourceFormat::Json => parse_json(source, name),
        SourceFormat::Toml => parse_toml(source, name),
        SourceFormat::PackageJson => {
            let mut manifest = parse_json(source, name)?;
            match manifest.get_mut(PACKAGE_JSON_FIELD).map(Value::take) {
                None | Some(Value::Null) => Err(ConfigError::malformed(
                    PACKAGE_JSON_FIELD,
                    "package.json has no `tailwind` field",
                )),
                Some(value) => Ok(value),
            }
        }
    }
}

fn parse_json(source: &str, name: &str) -> Result<Value> {
    serde_json::from_str(source).map_err(|e| {
        let offset = offset_of(source, e.line(), e.column());
        ConfigError::syntax(name, source, format!("invalid JSON: {e}"), (offset, 0))
    })
}

fn parse_toml(source: &str, name: &str) -> Result<Value> {
    let table: toml::Table = toml::from_str(source).map_err(|e| {
        let span = e.span().unwrap_or(0..0);
        ConfigError::syntax(
            name,
            source,
            format!("invalid TOML: {}", e.message()),
            span,
        )
    })?;

    serde_json::to_value(table)
        .map_err(|e| ConfigError::malformed("toml", format!("TOML to JSON conversion failed: {e}")))
}
