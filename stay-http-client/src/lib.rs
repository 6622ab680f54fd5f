//! Booking API HTTP Client Library
//!
//! Blocking client, resource services and typed models for the
//! booking/property REST API.
//!
//! # Features
//!
//! - One service per resource (`/properties`, `/bookings`)
//! - Authentication passed explicitly with every call, never stored globally
//! - Every response returned to the caller, whatever its status
//! - Error bodies decoded by status into [`ErrorPayload`]
//! - Server date arrays normalized at a single boundary, [`DateParts`]
//!
//! # Example
//!
//! ```no_run
//! use stay_http_client::{ApiClient, ApiOutcome, Auth, Credentials, PropertyResponse, PropertyService};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new()?;
//! let auth = Auth::basic(Credentials::new("admin", "secret"));
//!
//! let response = PropertyService::new(&client).retrieve("4814adee-cd2e-4c70-921d-19b4f0cd527d", &auth)?;
//! match response.outcome::<PropertyResponse>()? {
//!     ApiOutcome::Success { body, .. } => println!("alias: {:?}", body.alias),
//!     ApiOutcome::NoContent { .. } => println!("no such property"),
//!     ApiOutcome::Failure { status, payload } => println!("{}: {:?}", status, payload),
//! }
//! # Ok(())
//! # }
//! ```

mod auth;
mod client;
pub mod dates;
mod error;
mod models;
mod response;
mod services;

pub use auth::{Auth, Credentials, INVALID_PASSWORD, INVALID_USERNAME, Role, RoleCredentials};
pub use client::{ApiClient, ApiClientBuilder, DEFAULT_BASE_URL};
pub use dates::DateParts;
pub use error::{ApiError, DateError};
pub use models::{
    AuthErrorResponse, BookingErrorResponse, BookingRequest, BookingResponse, Guest, GuestResponse,
    PropertyRequest, PropertyResponse, STATUS_SCHEDULED, ValidationArgument,
    ValidationErrorDetail, ValidationErrorResponse,
};
pub use reqwest::StatusCode;
pub use response::{ApiOutcome, ErrorPayload, RawResponse};
pub use services::{BookingService, PropertyService};
