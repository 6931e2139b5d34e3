//! Logging configuration for xamin
//!
//! Compact terminal output plus optional file logging using tracing.

use crate::Result;
use std::path::Path;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use xamin_core::Error;

/// Build the default filter for the xamin crates at the given level
///
/// `RUST_LOG` takes precedence when it is set and valid.
pub fn env_filter(verbose: bool) -> Result<EnvFilter> {
    let level = if verbose { "debug" } else { "info" };

    EnvFilter::try_from_default_env()
        .or_else(|_| {
            EnvFilter::try_new(format!(
                "xamin={level},xamin_engine={level},xamin_config={level}"
            ))
        })
        .map_err(|e| Error::Config(format!("Invalid log filter: {e}")))
}

/// Initialize the logging system
///
/// # Arguments
/// * `verbose` - Enable debug level logging
/// * `log_file` - Optional path to append logs to
///
/// # Examples
/// ```ignore
/// // Basic usage with info level
/// init(false, None)?;
///
/// // Write verbose logs to file
/// init(true, Some(Path::new("debug.log")))?;
/// ```
pub fn init(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let stdout_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .with_ansi(true)
        .with_writer(std::io::stderr);

    // No timestamps in normal mode
    let stdout_layer = if verbose {
        stdout_layer.with_filter(env_filter(verbose)?).boxed()
    } else {
        stdout_layer
            .without_time()
            .with_filter(env_filter(verbose)?)
            .boxed()
    };

    let file_layer = match log_file {
        Some(log_path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_path)
                .map_err(|e| {
                    Error::Config(format!(
                        "Failed to open log file {}: {e}",
                        log_path.display()
                    ))
                })?;

            let debug_filter = EnvFilter::try_new("debug")
                .map_err(|e| Error::Config(format!("Invalid log filter: {e}")))?;

            Some(
                fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .pretty()
                    .with_filter(debug_filter),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to initialize logging: {e}")))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_env_filter_builds_for_both_levels() {
        assert!(env_filter(false).is_ok());
        assert!(env_filter(true).is_ok());
    }
}
