//! Logging infrastructure for the twconf CLI.
//!
//! Log lines go to stderr so that `twconf show` output can be piped.
//!
//! # Example
//!
//! ```rust,no_run
//! use twconf_cli::logger::init_logger;
//! use tracing::debug;
//!
//! init_logger(false, false, false);
//! debug!("Loading {}", "tailwind.config.js");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "twconf=debug,twconf_cli=debug";
const QUIET_FILTER: &str = "twconf=error,twconf_cli=error";
const DEFAULT_FILTER: &str = "twconf=info,twconf_cli=info";

/// Initialize the tracing subscriber with the specified options.
///
/// Call once at startup, before any logging occurs.
///
/// # Verbosity Levels
///
/// The logging level is determined in this order:
/// 1. `--verbose` flag: DEBUG for twconf crates
/// 2. `--quiet` flag: ERROR only
/// 3. `RUST_LOG` environment variable: Custom filter
/// 4. Default: INFO for twconf crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

/// Initialize logger with custom environment filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // The global subscriber can only be installed once per process, so
    // these tests only exercise filter selection.

    #[test]
    fn verbose_wins_over_quiet() {
        assert_eq!(filter_for(true, true).to_string(), EnvFilter::new(VERBOSE_FILTER).to_string());
    }

    #[test]
    fn quiet_filter() {
        assert_eq!(filter_for(false, true).to_string(), EnvFilter::new(QUIET_FILTER).to_string());
    }

    #[test]
    #[serial]
    fn rust_log_overrides_default() {
        unsafe {
            std::env::set_var("RUST_LOG", "twconf=trace");
        }
        let filter = filter_for(false, false);
        unsafe {
            std::env::remove_var("RUST_LOG");
        }
        assert_eq!(filter.to_string(), "twconf=trace");
    }

    #[test]
    #[serial]
    fn default_filter_without_rust_log() {
        unsafe {
            std::env::remove_var("RUST_LOG");
        }
        assert_eq!(
            filter_for(false, false).to_string(),
            EnvFilter::new(DEFAULT_FILTER).to_string()
        );
    }
}
