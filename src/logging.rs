use crate::error::AnalyticsError;
use crate::Result;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Initialise console logging. `RUST_LOG` overrides the built-in filter.
pub fn init_logging(verbose: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(verbose)
        .with_line_number(verbose)
        .try_init()
        .map_err(subscriber_error)
}

/// Append plain-text logs to `log_file` instead of the console
pub fn init_file_logging(log_file: &Path, verbose: bool) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(default_filter(verbose))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(subscriber_error)
}

fn default_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("nova_analytics=debug")
    } else {
        EnvFilter::new("nova_analytics=info")
    }
}

fn subscriber_error(e: Box<dyn std::error::Error + Send + Sync>) -> AnalyticsError {
    AnalyticsError::Configuration {
        reason: format!("failed to install log subscriber: {}", e),
    }
}
