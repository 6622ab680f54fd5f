//! Soft assertions: record every failure, report once at the end

use crate::error::{AssertionErrors, AssertionFailure};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::panic::Location;
use stay_http_client::{RawResponse, StatusCode};
use tracing::debug;

/// Collector threaded through validation functions
///
/// Checks never stop execution. Call [`SoftAssert::finish`] when the scenario
/// is done to turn the collected failures into a single error.
///
/// # Example
///
/// ```
/// use stay_contract::SoftAssert;
///
/// let mut soft = SoftAssert::new();
/// soft.assert_eq(&"beach", &"lake", "Alias mismatch");
/// soft.check(1 + 1 == 3, "arithmetic");
///
/// let errors = soft.finish().unwrap_err();
/// assert_eq!(errors.failures.len(), 2);
/// assert_eq!(errors.checks, 2);
/// ```
#[derive(Debug, Default)]
pub struct SoftAssert {
    checks: usize,
    failures: Vec<AssertionFailure>,
}

impl SoftAssert {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a boolean check
    #[track_caller]
    pub fn check(&mut self, condition: bool, message: impl Into<String>) -> bool {
        self.checks += 1;
        if !condition {
            self.record(message.into(), Location::caller());
        }
        condition
    }

    /// Record an unconditional failure
    #[track_caller]
    pub fn fail(&mut self, message: impl Into<String>) {
        self.check(false, message);
    }

    /// Check two values for equality
    #[track_caller]
    pub fn assert_eq<T: PartialEq + Debug + ?Sized>(
        &mut self,
        actual: &T,
        expected: &T,
        message: &str,
    ) -> bool {
        let equal = actual == expected;
        self.check(
            equal,
            format!("{}: expected {:?}, got {:?}", message, expected, actual),
        )
    }

    /// Check that an optional value is present
    #[track_caller]
    pub fn assert_some<T>(&mut self, value: &Option<T>, message: &str) -> bool {
        self.check(value.is_some(), message)
    }

    /// Check the status code of a response
    #[track_caller]
    pub fn expect_status(&mut self, response: &RawResponse, expected: StatusCode) -> bool {
        let actual = response.status();
        self.check(
            actual == expected,
            format!(
                "Unexpected HTTP status code: expected {}, got {} (body: {})",
                expected.as_u16(),
                actual.as_u16(),
                truncate(response.body())
            ),
        )
    }

    /// Decode a response body, recording a failure instead of erroring
    #[track_caller]
    pub fn decode<T: DeserializeOwned>(&mut self, response: &RawResponse) -> Option<T> {
        match response.json() {
            Ok(value) => {
                self.checks += 1;
                Some(value)
            }
            Err(e) => {
                self.fail(e.to_string());
                None
            }
        }
    }

    /// Number of checks performed so far
    pub fn check_count(&self) -> usize {
        self.checks
    }

    /// Failures recorded so far
    pub fn failures(&self) -> &[AssertionFailure] {
        &self.failures
    }

    /// Whether no check has failed yet
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Finish the run, failing if any check failed
    pub fn finish(self) -> Result<(), AssertionErrors> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(AssertionErrors {
                checks: self.checks,
                failures: self.failures,
            })
        }
    }

    fn record(&mut self, message: String, location: &Location<'_>) {
        let location = format!("{}:{}", location.file(), location.line());
        debug!(%location, %message, "soft assertion failed");
        self.failures.push(AssertionFailure { message, location });
    }
}

fn truncate(body: &str) -> &str {
    const LIMIT: usize = 200;
    match body.char_indices().nth(LIMIT) {
        Some((index, _)) => &body[..index],
        None => body,
    }
}
