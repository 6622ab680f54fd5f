//! Booking API Contract Library
//!
//! Building blocks for black-box contract scenarios against the booking API:
//! fixtures that build requests (some from live server state), soft
//! assertions that collect every failure before reporting, and a registry of
//! scenarios discovered at link time.
//!
//! # Quick Example
//!
//! ```
//! use stay_contract::{FieldSet, SoftAssert, construct_property, validate_property_response};
//! use stay_http_client::PropertyResponse;
//!
//! let fields = FieldSet::from_names(&["alias", "countryCode"]);
//! let sent = construct_property(&fields);
//!
//! // What the server might echo back
//! let received = PropertyResponse {
//!     alias: sent.alias.clone(),
//!     country_code: Some("PT".to_string()),
//!     ..Default::default()
//! };
//!
//! let mut soft = SoftAssert::new();
//! validate_property_response(&mut soft, &received, &fields, &sent);
//!
//! let errors = soft.finish().unwrap_err();
//! assert_eq!(errors.failures.len(), 1);
//! assert!(errors.failures[0].message.starts_with("Country code mismatch"));
//! ```
//!
//! # Key Concepts
//!
//! ## Field sets
//!
//! A [`FieldSet`] names the fields a fixture populates and, symmetrically,
//! the fields an assertion checks. Fields outside the set are left out of
//! the request body entirely.
//!
//! ## Soft assertions
//!
//! [`SoftAssert`] is passed by `&mut` into every validation helper. Checks
//! never abort; [`SoftAssert::finish`] turns the collected failures into one
//! [`AssertionErrors`].
//!
//! ## Scenarios
//!
//! A scenario is a plain function taking a [`ScenarioContext`]. Submit it as
//! a [`ScenarioPlugin`] through [`inventory`] and the CLI will find it.
//! Transport failures abort a scenario with [`ScenarioError::Transport`];
//! contract violations end it with [`ScenarioError::Assertions`].

mod assertions;
mod error;
mod fields;
mod fixtures;
mod registry;
mod soft;

pub use assertions::{
    AUTH_ERROR_MESSAGE, BAD_CREDENTIALS, ExpectedAuthError, ExpectedBookingRejection,
    FULL_AUTHENTICATION_REQUIRED, INVALID_BOOKING_DETAIL, INVALID_BOOKING_TITLE,
    UNAUTHORIZED_ERROR, assert_unique_values, expect_auth_error, expect_booking_rejection,
    expect_entity, expect_failure, expect_validation_error, is_valid_uuid,
    validate_auth_error, validate_booking_rejection, validate_booking_response,
    validate_detail_mentions, validate_field_error, validate_property_response,
};
pub use error::{AssertionErrors, AssertionFailure, FixtureError, RegistrationError, ScenarioError};
pub use fields::{BookingField, Field, FieldSet, PropertyField};
pub use fixtures::{
    ALIAS_PREFIX, DEFAULT_COUNTRY_CODE, OverlapKind, available_start_date, booking_with,
    construct_property, create_available_booking, create_booking_with_available_dates,
    create_property, custom_booking, default_guest, last_booked_date, unique_alias,
};
pub use registry::{
    Scenario, ScenarioContext, ScenarioFn, ScenarioPlugin, ScenarioRegistry,
    ScenarioRegistryBuilder, Suite,
};
pub use soft::SoftAssert;

// Re-export inventory for scenario crates
pub use inventory;
