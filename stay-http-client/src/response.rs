//! Raw responses and status-keyed decoding

use crate::error::ApiError;
use crate::models::{AuthErrorResponse, BookingErrorResponse, ValidationErrorResponse};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

/// A response captured in full, whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    status: StatusCode,
    body: String,
}

impl RawResponse {
    /// Build a response from parts
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// HTTP status code
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response body as text
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Whether the body is empty or whitespace
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }

    /// Decode the body as `T` regardless of status
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|source| ApiError::Decode {
            status: self.status.as_u16(),
            target: std::any::type_name::<T>(),
            source,
        })
    }

    /// Decode the body according to its status code
    ///
    /// * 2xx with a body decodes as `T`
    /// * 2xx without a body is `NoContent`
    /// * error statuses select one decoder per payload shape
    pub fn outcome<T: DeserializeOwned>(&self) -> Result<ApiOutcome<T>, ApiError> {
        let status = self.status;
        if status.is_success() {
            if self.is_empty() {
                return Ok(ApiOutcome::NoContent { status });
            }
            return Ok(ApiOutcome::Success {
                status,
                body: self.json()?,
            });
        }

        Ok(ApiOutcome::Failure {
            status,
            payload: self.error_payload()?,
        })
    }

    /// Decode an error body using the shape implied by the status code
    pub fn error_payload(&self) -> Result<ErrorPayload, ApiError> {
        if self.is_empty() {
            return Ok(ErrorPayload::Other(self.body.clone()));
        }

        let payload = match self.status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ErrorPayload::Authentication(self.json()?)
            }
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT => ErrorPayload::Validation(self.json()?),
            StatusCode::UNPROCESSABLE_ENTITY => ErrorPayload::BusinessRule(self.json()?),
            _ => ErrorPayload::Other(self.body.clone()),
        };
        Ok(payload)
    }
}

/// Decoded response, keyed by status class
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome<T> {
    /// 2xx with a decoded entity
    Success { status: StatusCode, body: T },
    /// 2xx with an empty body, e.g. 204 for an unknown id
    NoContent { status: StatusCode },
    /// Any non-2xx status
    Failure {
        status: StatusCode,
        payload: ErrorPayload,
    },
}

impl<T> ApiOutcome<T> {
    /// Status code of the underlying response
    pub fn status(&self) -> StatusCode {
        match self {
            ApiOutcome::Success { status, .. }
            | ApiOutcome::NoContent { status }
            | ApiOutcome::Failure { status, .. } => *status,
        }
    }

    /// The decoded entity, if this was a success with a body
    pub fn success(self) -> Option<T> {
        match self {
            ApiOutcome::Success { body, .. } => Some(body),
            _ => None,
        }
    }

    /// The error payload, if this was a failure
    pub fn failure(self) -> Option<ErrorPayload> {
        match self {
            ApiOutcome::Failure { payload, .. } => Some(payload),
            _ => None,
        }
    }
}

/// Error bodies the API produces; there is no shared discriminator field
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorPayload {
    /// 401/403 from the security layer
    Authentication(AuthErrorResponse),
    /// 400/409 problem details, optionally with field errors
    Validation(ValidationErrorResponse),
    /// 422 booking rule violation
    BusinessRule(BookingErrorResponse),
    /// Empty body or a status without a known shape
    Other(String),
}

impl ErrorPayload {
    /// Short name of the payload shape, used in assertion messages
    pub fn kind(&self) -> &'static str {
        match self {
            ErrorPayload::Authentication(_) => "authentication",
            ErrorPayload::Validation(_) => "validation",
            ErrorPayload::BusinessRule(_) => "business-rule",
            ErrorPayload::Other(_) => "other",
        }
    }
}
