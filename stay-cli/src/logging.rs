//! Tracing subscriber setup

use crate::error::CliError;
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const CRATES: [&str; 4] = ["stay_check", "stay_contract", "stay_http_client", "stay_scenarios"];

/// Filter directives applying `level` to this workspace's crates
pub fn directives(level: &str) -> String {
    CRATES
        .iter()
        .map(|krate| format!("{}={}", krate, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Open `path` for appending, creating it if needed
pub fn open_log_file(path: &Path) -> Result<File, CliError> {
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// Install the global subscriber
///
/// Console output goes to stderr, filtered by `RUST_LOG` or else `level`.
/// With `log_file`, scenario lifecycle events at info and above are also
/// appended there without ANSI colors.
pub fn init(level: &str, log_file: Option<&Path>) -> Result<(), CliError> {
    let console_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directives(level)))
        .map_err(|e| CliError::Logging(e.to_string()))?;
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console_filter);

    let file = match log_file {
        Some(path) => {
            let writer = open_log_file(path)?;
            let filter = EnvFilter::try_new(directives("info"))
                .map_err(|e| CliError::Logging(e.to_string()))?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(writer))
                    .with_filter(filter),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))
}
