//! Error types for the CLI

use std::path::PathBuf;
use thiserror::Error;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Settings file exists but could not be read
    #[error("Failed to read settings from {}: {source}", .path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Http(#[from] stay_http_client::ApiError),

    /// Registration error
    #[error("Registration error: {0}")]
    Registration(#[from] stay_contract::RegistrationError),

    /// Logging could not be initialized
    #[error("Logging setup failed: {0}")]
    Logging(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
