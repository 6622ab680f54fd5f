//! Request payloads and response models
//!
//! Response fields are all optional: a field the server leaves out decodes as
//! `None` so that callers can assert on it instead of failing to decode.

use crate::dates::DateParts;
use serde::{Deserialize, Deserializer, Serialize};

/// Default status assigned to new bookings
pub const STATUS_SCHEDULED: &str = "SCHEDULED";

// ============================================================================
// Requests
// ============================================================================

/// Body of `POST /properties`
///
/// Unset fields are omitted from the JSON entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Guest details on a booking request; dates are `YYYY-MM-DD`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
}

impl Guest {
    /// Guest with all three fields set
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        date_of_birth: impl Into<String>,
    ) -> Self {
        Self {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            date_of_birth: Some(date_of_birth.into()),
        }
    }
}

/// Body of `POST /bookings` and `PATCH /bookings/{id}/rebook`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest: Option<Guest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
}

// ============================================================================
// Success responses
// ============================================================================

/// A property as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyResponse {
    pub id: Option<String>,
    pub alias: Option<String>,
    pub country_code: Option<String>,
    pub created_at: Option<DateParts>,
}

/// Guest details as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuestResponse {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<DateParts>,
}

/// A booking as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingResponse {
    pub id: Option<String>,
    pub start_date: Option<DateParts>,
    pub end_date: Option<DateParts>,
    pub status: Option<String>,
    pub guest: Option<GuestResponse>,
    pub property_id: Option<String>,
}

// ============================================================================
// Error responses
// ============================================================================

/// Body of 401/403 responses produced by the security filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthErrorResponse {
    pub exception: Option<String>,
    pub path: Option<String>,
    pub error: Option<String>,
    pub message: Option<String>,
    /// Kept as raw JSON; only its presence is meaningful
    pub timestamp: Option<serde_json::Value>,
}

/// Treat an explicit `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One argument attached to a field validation error
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationArgument {
    #[serde(deserialize_with = "null_as_default")]
    pub codes: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub arguments: Vec<serde_json::Value>,
    pub default_message: Option<String>,
    pub code: Option<String>,
}

/// Field-level validation failure
///
/// `arguments` mixes resolvable objects with bare values such as `[]`, so it
/// is kept as raw JSON; [`ValidationErrorDetail::resolvable_arguments`] picks
/// out the object entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationErrorDetail {
    #[serde(deserialize_with = "null_as_default")]
    pub codes: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub arguments: Vec<serde_json::Value>,
    pub default_message: Option<String>,
    pub object_name: Option<String>,
    pub field: Option<String>,
    pub rejected_value: Option<serde_json::Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub binding_failure: bool,
    pub code: Option<String>,
}

impl ValidationErrorDetail {
    /// Arguments that decode as [`ValidationArgument`]
    pub fn resolvable_arguments(&self) -> Vec<ValidationArgument> {
        self.arguments
            .iter()
            .filter(|value| value.is_object())
            .filter_map(|value| ValidationArgument::deserialize(value).ok())
            .collect()
    }
}

/// Problem-details body of 400 and 409 responses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationErrorResponse {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub status: Option<u16>,
    pub detail: Option<String>,
    pub instance: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub errors: Vec<ValidationErrorDetail>,
}

impl ValidationErrorResponse {
    /// First error reported against the given field
    pub fn error_for(&self, field: &str) -> Option<&ValidationErrorDetail> {
        self.errors
            .iter()
            .find(|detail| detail.field.as_deref() == Some(field))
    }
}

/// Problem-details body of 422 booking rule violations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingErrorResponse {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub status: Option<u16>,
    pub detail: Option<String>,
    pub instance: Option<String>,
    #[serde(rename = "BOOKING_DATES_UNAVAILABLE")]
    pub booking_dates_unavailable: Option<String>,
}
