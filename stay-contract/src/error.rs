//! Error types for the contract library

use stay_http_client::{ApiError, DateError, Role};
use std::fmt;
use thiserror::Error;

/// A single failed soft assertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionFailure {
    /// What was checked and what went wrong
    pub message: String,
    /// `file:line` of the check
    pub location: String,
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

fn render_failures(failures: &[AssertionFailure]) -> String {
    failures
        .iter()
        .map(|failure| format!("\n  - {}", failure))
        .collect()
}

/// All failures collected by one soft-assertion run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "{} of {} assertion(s) failed:{}",
    .failures.len(),
    .checks,
    render_failures(.failures)
)]
pub struct AssertionErrors {
    /// Number of checks performed
    pub checks: usize,
    /// Every failed check, in order
    pub failures: Vec<AssertionFailure>,
}

/// Error type for fixture construction that needs live server state
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The API call itself failed
    #[error("API call failed: {0}")]
    Api(#[from] ApiError),
    /// The API answered with a status the fixture cannot work with
    #[error("{operation} returned {status}: {body}")]
    UnexpectedStatus {
        /// Operation being performed, e.g. "GET /bookings"
        operation: &'static str,
        /// Status code received
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },
    /// A server date could not be normalized
    #[error("Date normalization failed: {0}")]
    Date(#[from] DateError),
    /// A response lacked a field the fixture depends on
    #[error("{entity} response is missing '{field}'")]
    MissingField {
        /// Entity name
        entity: &'static str,
        /// Field name
        field: &'static str,
    },
    /// The run has no credentials for a role the scenario needs
    #[error("No credentials configured for role {0}")]
    MissingCredentials(Role),
}

/// Error type for a scenario run
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// Transport failure; the scenario was aborted
    #[error("Transport failure: {0}")]
    Transport(#[from] ApiError),
    /// One or more soft assertions failed
    #[error("{0}")]
    Assertions(#[from] AssertionErrors),
    /// Preconditions could not be established
    #[error("Fixture setup failed: {0}")]
    Fixture(#[from] FixtureError),
    /// Any other failure raised by scenario code
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Error type for registration failures
#[derive(Debug, Clone, Error)]
pub enum RegistrationError {
    /// Attempted to register two scenarios with the same name
    #[error("Duplicate scenario registration for '{0}'")]
    DuplicateScenario(&'static str),
}
