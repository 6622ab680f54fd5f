//! `/properties` resource

use crate::auth::Auth;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::PropertyRequest;
use crate::response::RawResponse;

const PROPERTIES: &str = "properties";

/// Operations on `/properties`
#[derive(Debug, Clone, Copy)]
pub struct PropertyService<'a> {
    client: &'a ApiClient,
}

impl<'a> PropertyService<'a> {
    /// Wrap a client
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /properties/{id}`
    ///
    /// `id` is sent as-is, so malformed UUIDs reach the server unchanged.
    pub fn retrieve(&self, id: &str, auth: &Auth) -> Result<RawResponse, ApiError> {
        self.client.get(&[PROPERTIES, id], auth)
    }

    /// `GET /properties`
    pub fn retrieve_all(&self, auth: &Auth) -> Result<RawResponse, ApiError> {
        self.client.get(&[PROPERTIES], auth)
    }

    /// `POST /properties`
    pub fn create(&self, property: &PropertyRequest, auth: &Auth) -> Result<RawResponse, ApiError> {
        self.client.post_json(&[PROPERTIES], property, auth)
    }
}
