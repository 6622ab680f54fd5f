//! Validation helpers that record into a [`SoftAssert`]
//!
//! Every helper is `#[track_caller]`, so failures point at the scenario line
//! that asked for the check rather than at this module.

use crate::fields::{BookingField, FieldSet, PropertyField};
use crate::soft::SoftAssert;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::hash::Hash;
use stay_http_client::{
    AuthErrorResponse, BookingErrorResponse, BookingRequest, BookingResponse, DateParts,
    ErrorPayload, PropertyRequest, PropertyResponse, RawResponse, STATUS_SCHEDULED, StatusCode,
    ValidationErrorResponse,
};
use uuid::Uuid;

/// `error` field of every authentication failure
pub const UNAUTHORIZED_ERROR: &str = "Unauthorized";
/// `message` field of every authentication failure
pub const AUTH_ERROR_MESSAGE: &str = "Error while authenticating your access";
/// `exception` reported for wrong credentials
pub const BAD_CREDENTIALS: &str = "Bad credentials";
/// `exception` reported when no credentials were sent
pub const FULL_AUTHENTICATION_REQUIRED: &str =
    "Full authentication is required to access this resource";
/// `title` of a booking the server refuses outright
pub const INVALID_BOOKING_TITLE: &str = "Invalid Booking";
/// `detail` of a booking the server refuses outright
pub const INVALID_BOOKING_DETAIL: &str = "Supplied booking is not valid";

/// Whether `value` is a hyphenated UUID
pub fn is_valid_uuid(value: &str) -> bool {
    value.len() == 36 && Uuid::try_parse(value).is_ok()
}

#[track_caller]
fn check_uuid(soft: &mut SoftAssert, id: &Option<String>) -> bool {
    soft.check(
        id.as_deref().is_some_and(is_valid_uuid),
        format!("Invalid UUID format: {:?}", id),
    )
}

#[track_caller]
fn check_date(
    soft: &mut SoftAssert,
    actual: &Option<DateParts>,
    expected: &Option<String>,
    label: &str,
) -> bool {
    let normalized = match actual.as_ref().map(DateParts::normalize).transpose() {
        Ok(normalized) => normalized,
        Err(e) => {
            soft.fail(format!("{} could not be normalized: {}", label, e));
            return false;
        }
    };
    soft.assert_eq(
        &normalized.as_deref(),
        &expected.as_deref(),
        &format!("{} mismatch", label),
    )
}

/// Check the named fields of a property against what was sent
///
/// `id` is checked for UUID syntax, `createdAt` for presence and a parseable
/// timestamp. The server assigns both, so neither is compared for equality.
#[track_caller]
pub fn validate_property_response(
    soft: &mut SoftAssert,
    actual: &PropertyResponse,
    fields: &FieldSet<PropertyField>,
    expected: &PropertyRequest,
) {
    for field in fields.iter() {
        match field {
            PropertyField::Id => {
                check_uuid(soft, &actual.id);
            }
            PropertyField::Alias => {
                soft.assert_eq(&actual.alias, &expected.alias, "Alias mismatch");
            }
            PropertyField::CountryCode => {
                soft.assert_eq(
                    &actual.country_code,
                    &expected.country_code,
                    "Country code mismatch",
                );
            }
            PropertyField::CreatedAt => match &actual.created_at {
                None => soft.fail("CreatedAt should not be null"),
                Some(parts) => {
                    if let Err(e) = parts.to_naive_datetime() {
                        soft.fail(format!("CreatedAt is not a valid timestamp: {}", e));
                    } else {
                        soft.check(true, "CreatedAt");
                    }
                }
            },
        }
    }
}

/// Check the named fields of a booking against what was sent
///
/// Dates are compared after normalization, so `[2025, 5, 1]` matches
/// `"2025-05-01"`. A request without a status expects `SCHEDULED`.
#[track_caller]
pub fn validate_booking_response(
    soft: &mut SoftAssert,
    actual: &BookingResponse,
    fields: &FieldSet<BookingField>,
    expected: &BookingRequest,
) {
    for field in fields.iter() {
        match field {
            BookingField::Id => {
                check_uuid(soft, &actual.id);
            }
            BookingField::StartDate => {
                check_date(soft, &actual.start_date, &expected.start_date, "Start date");
            }
            BookingField::EndDate => {
                check_date(soft, &actual.end_date, &expected.end_date, "End date");
            }
            BookingField::Status => {
                let expected_status = expected.status.as_deref().unwrap_or(STATUS_SCHEDULED);
                soft.assert_eq(
                    &actual.status.as_deref(),
                    &Some(expected_status),
                    "Status mismatch",
                );
            }
            BookingField::Guest => match (&actual.guest, &expected.guest) {
                (Some(actual_guest), Some(expected_guest)) => {
                    soft.assert_eq(
                        &actual_guest.first_name,
                        &expected_guest.first_name,
                        "Guest first name mismatch",
                    );
                    soft.assert_eq(
                        &actual_guest.last_name,
                        &expected_guest.last_name,
                        "Guest last name mismatch",
                    );
                    check_date(
                        soft,
                        &actual_guest.date_of_birth,
                        &expected_guest.date_of_birth,
                        "Guest date of birth",
                    );
                }
                (None, None) => {
                    soft.check(true, "Guest");
                }
                (actual_guest, _) => soft.fail(format!(
                    "Guest mismatch: expected {:?}, got {:?}",
                    expected.guest, actual_guest
                )),
            },
            BookingField::PropertyId => {
                soft.assert_eq(
                    &actual.property_id,
                    &expected.property_id,
                    "Property ID mismatch",
                );
            }
        }
    }
}

/// Check that `key` yields no duplicates over `items`
#[track_caller]
pub fn assert_unique_values<T, K, F>(
    soft: &mut SoftAssert,
    items: &[T],
    key: F,
    message: &str,
) -> bool
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let unique: HashSet<K> = items.iter().map(key).collect();
    soft.check(
        unique.len() == items.len(),
        format!(
            "{}: {} item(s), {} distinct",
            message,
            items.len(),
            unique.len()
        ),
    )
}

/// Expected body of a 401 from the security layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedAuthError {
    pub exception: &'static str,
    pub path: String,
    pub error: &'static str,
    pub message: &'static str,
}

impl ExpectedAuthError {
    /// Wrong username or password
    pub fn bad_credentials(path: impl Into<String>) -> Self {
        Self::with_exception(BAD_CREDENTIALS, path)
    }

    /// No `Authorization` header at all
    pub fn missing_credentials(path: impl Into<String>) -> Self {
        Self::with_exception(FULL_AUTHENTICATION_REQUIRED, path)
    }

    fn with_exception(exception: &'static str, path: impl Into<String>) -> Self {
        Self {
            exception,
            path: path.into(),
            error: UNAUTHORIZED_ERROR,
            message: AUTH_ERROR_MESSAGE,
        }
    }
}

/// Check an authentication error body; `timestamp` must be present
#[track_caller]
pub fn validate_auth_error(
    soft: &mut SoftAssert,
    actual: &AuthErrorResponse,
    expected: &ExpectedAuthError,
) {
    soft.assert_eq(
        &actual.exception.as_deref(),
        &Some(expected.exception),
        "Exception mismatch",
    );
    soft.assert_eq(
        &actual.path.as_deref(),
        &Some(expected.path.as_str()),
        "Path mismatch",
    );
    soft.assert_eq(&actual.error.as_deref(), &Some(expected.error), "Error mismatch");
    soft.assert_eq(
        &actual.message.as_deref(),
        &Some(expected.message),
        "Message mismatch",
    );
    soft.check(
        actual.timestamp.as_ref().is_some_and(|value| !value.is_null()),
        "Timestamp should not be null",
    );
}

/// Check that a validation error names `field`
#[track_caller]
pub fn validate_field_error(soft: &mut SoftAssert, actual: &ValidationErrorResponse, field: &str) -> bool {
    soft.check(
        actual.error_for(field).is_some(),
        format!(
            "Expected a validation error on field '{}', got {:?}",
            field,
            actual
                .errors
                .iter()
                .filter_map(|detail| detail.field.as_deref())
                .collect::<Vec<_>>()
        ),
    )
}

/// Check that the problem `detail` mentions `needle`
#[track_caller]
pub fn validate_detail_mentions(
    soft: &mut SoftAssert,
    actual: &ValidationErrorResponse,
    needle: &str,
) -> bool {
    soft.check(
        actual.detail.as_deref().is_some_and(|detail| detail.contains(needle)),
        format!("Expected detail to mention '{}', got {:?}", needle, actual.detail),
    )
}

/// Expected body of a 422 booking rejection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpectedBookingRejection {
    pub title: Option<&'static str>,
    pub detail: Option<&'static str>,
    pub dates_unavailable: bool,
}

impl ExpectedBookingRejection {
    /// Rejected because the dates collide with an existing booking
    pub fn dates_unavailable() -> Self {
        Self {
            dates_unavailable: true,
            ..Self::default()
        }
    }

    /// Rejected as malformed, e.g. a zero-night stay
    pub fn invalid_booking() -> Self {
        Self {
            title: Some(INVALID_BOOKING_TITLE),
            detail: Some(INVALID_BOOKING_DETAIL),
            dates_unavailable: false,
        }
    }
}

/// Check a booking rejection body
#[track_caller]
pub fn validate_booking_rejection(
    soft: &mut SoftAssert,
    actual: &BookingErrorResponse,
    expected: &ExpectedBookingRejection,
) {
    if let Some(title) = expected.title {
        soft.assert_eq(&actual.title.as_deref(), &Some(title), "Title mismatch");
    }
    if let Some(detail) = expected.detail {
        soft.assert_eq(&actual.detail.as_deref(), &Some(detail), "Detail mismatch");
    }
    if expected.dates_unavailable {
        soft.check(
            actual
                .booking_dates_unavailable
                .as_deref()
                .is_some_and(|value| !value.is_empty()),
            format!(
                "BOOKING_DATES_UNAVAILABLE should be set, got {:?}",
                actual.booking_dates_unavailable
            ),
        );
    }
}

/// Check the status and decode the entity
///
/// Returns `None` when either step failed; both are recorded.
#[track_caller]
pub fn expect_entity<T: DeserializeOwned>(
    soft: &mut SoftAssert,
    response: &RawResponse,
    status: StatusCode,
) -> Option<T> {
    if !soft.expect_status(response, status) {
        return None;
    }
    soft.decode(response)
}

/// Check the status and decode the error payload for it
#[track_caller]
pub fn expect_failure(
    soft: &mut SoftAssert,
    response: &RawResponse,
    status: StatusCode,
) -> Option<ErrorPayload> {
    if !soft.expect_status(response, status) {
        return None;
    }
    match response.error_payload() {
        Ok(payload) => Some(payload),
        Err(e) => {
            soft.fail(e.to_string());
            None
        }
    }
}

#[track_caller]
fn wrong_payload(soft: &mut SoftAssert, expected: &str, actual: &ErrorPayload) {
    soft.fail(format!(
        "Expected a {} error payload, got {}: {:?}",
        expected,
        actual.kind(),
        actual
    ));
}

/// Check a 401/403 response and its body
#[track_caller]
pub fn expect_auth_error(
    soft: &mut SoftAssert,
    response: &RawResponse,
    status: StatusCode,
    expected: &ExpectedAuthError,
) {
    match expect_failure(soft, response, status) {
        Some(ErrorPayload::Authentication(body)) => validate_auth_error(soft, &body, expected),
        Some(other) => wrong_payload(soft, "authentication", &other),
        None => {}
    }
}

/// Check a 400/409 response and return its problem details
#[track_caller]
pub fn expect_validation_error(
    soft: &mut SoftAssert,
    response: &RawResponse,
    status: StatusCode,
) -> Option<ValidationErrorResponse> {
    match expect_failure(soft, response, status)? {
        ErrorPayload::Validation(body) => Some(body),
        other => {
            wrong_payload(soft, "validation", &other);
            None
        }
    }
}

/// Check a 422 response and its body
#[track_caller]
pub fn expect_booking_rejection(
    soft: &mut SoftAssert,
    response: &RawResponse,
    expected: &ExpectedBookingRejection,
) {
    match expect_failure(soft, response, StatusCode::UNPROCESSABLE_ENTITY) {
        Some(ErrorPayload::BusinessRule(body)) => {
            validate_booking_rejection(soft, &body, expected)
        }
        Some(other) => wrong_payload(soft, "business-rule", &other),
        None => {}
    }
}
