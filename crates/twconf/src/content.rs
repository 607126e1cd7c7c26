//! Content pattern matching
//!
//! Compiles the `content` globs into an `ignore` override set so a consumer
//! can check which files the patterns select. Pattern semantics follow the
//! gitignore-style globs understood by `ignore`:
//!
//! - a leading `./` is dropped and every pattern is anchored at the project
//!   root, so `*.html` only matches files directly under it
//! - `!pattern` excludes files matched by earlier patterns
//! - `{html,js}` brace alternation and `**` are supported

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use ignore::overrides::{Override, OverrideBuilder};

use crate::error::{ConfigError, Result};

/// Compiled set of content patterns rooted at a project directory
#[derive(Debug, Clone)]
pub struct ContentMatcher {
    root: PathBuf,
    combined: Override,
    /// Non-negated patterns compiled on their own, for per-pattern counts
    positives: Vec<(String, Override)>,
}

impl ContentMatcher {
    /// Compile `patterns` relative to `root`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPattern` for a glob that fails to compile.
    pub fn new(root: impl AsRef<Path>, patterns: &[String]) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let mut builder = OverrideBuilder::new(&root);
        let mut positives = Vec::new();

        for pattern in patterns {
            let glob = normalize(pattern);
            builder.add(&glob).map_err(|e| invalid(pattern, e))?;

            if !glob.starts_with('!') {
                let single = OverrideBuilder::new(&root)
                    .add(&glob)
                    .and_then(|b| b.build())
                    .map_err(|e| invalid(pattern, e))?;
                positives.push((pattern.clone(), single));
            }
        }

        let combined = builder.build().map_err(|e| ConfigError::InvalidPattern {
            pattern: patterns.join(", "),
            message: e.to_string(),
        })?;

        Ok(Self {
            root,
            combined,
            positives,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the file at `path` (absolute under the root, or relative to it)
    /// is selected by the patterns.
    pub fn is_match(&self, path: &Path) -> bool {
        self.combined.matched(path, false).is_whitelist()
    }

    /// Walk the root and return every selected file, sorted.
    ///
    /// Selection is decided by the patterns alone: hidden entries and
    /// ignore files do not filter the walk.
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .overrides(self.combined.clone())
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_some_and(|t| t.is_file()) && self.is_match(entry.path()) {
                files.push(entry.into_path());
            }
        }
        files.sort();

        tracing::debug!(
            files = files.len(),
            "Scanned content under {}",
            self.root.display()
        );
        Ok(files)
    }

    /// Number of selected files each non-negated pattern accounts for,
    /// in pattern order.
    pub fn matches_per_pattern(&self) -> Result<Vec<(String, usize)>> {
        let files = self.scan()?;
        Ok(self
            .positives
            .iter()
            .map(|(pattern, single)| {
                let count = files
                    .iter()
                    .filter(|file| single.matched(file, false).is_whitelist())
                    .count();
                (pattern.clone(), count)
            })
            .collect())
    }
}

fn normalize(pattern: &str) -> String {
    let (negated, body) = match pattern.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, pattern),
    };
    let body = body.trim_start_matches("./").trim_start_matches('/');
    if negated {
        format!("!/{body}")
    } else {
        format!("/{body}")
    }
}

fn invalid(pattern: &str, err: ignore::Error) -> ConfigError {
    ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        message: err.to_string(),
    }
}
