//! Error types for configuration loading and validation.
//!
//! Every variant is fatal: a config that fails to load or validate is never
//! handed to the consumer in a partially populated state.

use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    // Discovery/loading errors
    #[error("config not found")]
    #[diagnostic(
        code(twconf::not_found),
        help("Create a tailwind.config.js in the project root or pass --config <path>")
    )]
    NotFound,

    #[error("unsupported configuration format: {}", .0.display())]
    #[diagnostic(
        code(twconf::unsupported_format),
        help("Supported sources: tailwind.config.{{js,cjs,mjs,ts,json}}, tailwind.toml, package.json")
    )]
    UnsupportedFormat(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    #[diagnostic(code(twconf::read_failed))]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Shape errors (missing field, wrong type)
    #[error("malformed config field `{field}`: {hint}")]
    #[diagnostic(code(twconf::malformed))]
    Malformed { field: String, hint: String },

    // Source encoding errors, with the offending location
    #[error("syntax error in {path}: {message}")]
    #[diagnostic(code(twconf::syntax))]
    Syntax {
        path: String,
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    // Consumer-side plugin resolution
    #[error("unknown plugin reference `{name}`")]
    #[diagnostic(
        code(twconf::unknown_plugin),
        help("Install the plugin or remove it from the `plugins` array")
    )]
    UnknownPluginReference { name: String },

    // Content pattern errors
    #[error("invalid content pattern `{pattern}`: {message}")]
    #[diagnostic(code(twconf::invalid_pattern))]
    InvalidPattern { pattern: String, message: String },

    #[error("content pattern `{pattern}` did not match any files")]
    #[diagnostic(
        code(twconf::content_unmatched),
        help("Patterns are resolved relative to the project root")
    )]
    ContentUnmatched { pattern: String },

    #[error("failed to walk content files: {0}")]
    #[diagnostic(code(twconf::walk))]
    Walk(#[from] ignore::Error),

    // I/O errors
    #[error("I/O error: {0}")]
    #[diagnostic(code(twconf::io))]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub fn malformed(field: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Malformed {
            field: field.into(),
            hint: hint.into(),
        }
    }

    pub fn read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Build a syntax error pointing at `span` inside `source`.
    pub fn syntax(
        path: impl Into<String>,
        source: &str,
        message: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Self {
        let path = path.into();
        Self::Syntax {
            src: NamedSource::new(&path, source.to_string()),
            path,
            message: message.into(),
            span: span.into(),
        }
    }

    /// Whether this error means the source did not have the expected shape.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. } | Self::Syntax { .. })
    }

    /// Dotted path of the offending field, when the error names one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Malformed { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Translate a 1-based line/column pair into a byte offset within `source`.
pub(crate) fn offset_of(source: &str, line: usize, column: usize) -> usize {
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(source.len())
}
