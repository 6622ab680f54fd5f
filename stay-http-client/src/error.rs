//! Error types for the API client

use crate::auth::Role;
use thiserror::Error;

/// Errors that can occur when talking to the booking API
///
/// Non-success status codes are deliberately absent: every response the server
/// produces is handed back to the caller, who decides whether the status was
/// the expected one.
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body did not match the requested model
    #[error("Failed to decode {status} response as {target}: {source}")]
    Decode {
        /// Status code of the response being decoded
        status: u16,
        /// Name of the model the body was decoded into
        target: &'static str,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Request body could not be serialized
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// Base URL cannot carry path segments
    #[error("Base URL cannot be used for API paths: {0}")]
    Url(String),

    /// Client initialization failed
    #[error("Client initialization failed: {0}")]
    ClientInit(String),

    /// No credentials were configured for the requested role
    #[error("No credentials configured for role {0}")]
    MissingCredentials(Role),
}

/// Errors raised when normalizing server date representations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Date array had the wrong number of components
    #[error("Expected {expected} date components, got {actual}: {parts:?}")]
    Length {
        /// Accepted component count, e.g. "3" or "3..=7"
        expected: &'static str,
        /// Number of components received
        actual: usize,
        /// The offending array
        parts: Vec<i64>,
    },

    /// Components were present but do not form a calendar date or time
    #[error("Date components out of range: {0:?}")]
    OutOfRange(Vec<i64>),

    /// A `YYYY-MM-DD` string could not be parsed
    #[error("Invalid date string '{0}', expected YYYY-MM-DD")]
    Format(String),
}
