//! Authentication modes attached to individual requests
//!
//! There is no process-wide auth state. Every service call receives an
//! [`Auth`] value, so switching to invalid or missing credentials affects only
//! the request it is passed to.

use crate::error::ApiError;
use reqwest::blocking::RequestBuilder;
use std::fmt;
use zeroize::Zeroizing;

/// Username used when deliberately sending wrong credentials
pub const INVALID_USERNAME: &str = "invalidUser";
/// Password used when deliberately sending wrong credentials
pub const INVALID_PASSWORD: &str = "invalidPass";

/// Roles known to the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Full access to properties and bookings
    Admin,
    /// Restricted account, forbidden from listing bookings
    User,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => f.write_str("ADMIN"),
            Role::User => f.write_str("USER"),
        }
    }
}

/// Basic-auth username and password
///
/// The password is zeroized on drop.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Create credentials from a username and password
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// The username
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Authentication applied to a single request
#[derive(Debug, Clone)]
pub enum Auth {
    /// Preemptive HTTP basic authentication
    Basic(Credentials),
    /// No `Authorization` header at all
    Anonymous,
}

impl Auth {
    /// Basic auth with the given credentials
    pub fn basic(credentials: Credentials) -> Self {
        Auth::Basic(credentials)
    }

    /// Basic auth with credentials the server is expected to reject
    pub fn invalid() -> Self {
        Auth::Basic(Credentials::new(INVALID_USERNAME, INVALID_PASSWORD))
    }

    /// No authentication
    pub fn anonymous() -> Self {
        Auth::Anonymous
    }

    /// Attach this auth mode to a request
    pub(crate) fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            // reqwest marks the generated header value as sensitive
            Auth::Basic(credentials) => {
                request.basic_auth(&credentials.username, Some(credentials.password.as_str()))
            }
            Auth::Anonymous => request,
        }
    }
}

/// Credentials for each configured role
#[derive(Debug, Clone, Default)]
pub struct RoleCredentials {
    admin: Option<Credentials>,
    user: Option<Credentials>,
}

impl RoleCredentials {
    /// Create an empty credential set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set credentials for a role, replacing any previous value
    pub fn with(mut self, role: Role, credentials: Credentials) -> Self {
        match role {
            Role::Admin => self.admin = Some(credentials),
            Role::User => self.user = Some(credentials),
        }
        self
    }

    /// Credentials for a role, if configured
    pub fn get(&self, role: Role) -> Option<&Credentials> {
        match role {
            Role::Admin => self.admin.as_ref(),
            Role::User => self.user.as_ref(),
        }
    }

    /// Valid basic auth for a role
    ///
    /// # Errors
    ///
    /// Returns `ApiError::MissingCredentials` if the role has no credentials.
    pub fn auth_for(&self, role: Role) -> Result<Auth, ApiError> {
        self.get(role)
            .cloned()
            .map(Auth::Basic)
            .ok_or(ApiError::MissingCredentials(role))
    }
}
