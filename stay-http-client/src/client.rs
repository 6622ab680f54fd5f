//! Blocking HTTP client wrapper for the booking API

use crate::auth::Auth;
use crate::error::ApiError;
use crate::response::RawResponse;
use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderValue};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "https://qa-assessment.svc.hostfully.com";

fn json_header() -> HeaderValue {
    HeaderValue::from_static("application/json")
}

/// The low-level API client
///
/// Sends one request per call and returns the full response for any status.
/// Only transport failures become errors; the client never retries.
///
/// # Example
///
/// ```no_run
/// use stay_http_client::{ApiClient, Auth};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ApiClient::builder()
///     .base_url("http://localhost:8080")?
///     .build()?;
///
/// let response = client.get(&["properties"], &Auth::anonymous())?;
/// println!("{} {}", response.status(), response.body());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: reqwest::blocking::Client,
    base_url: reqwest::Url,
}

impl ApiClient {
    /// Create a client for the default base URL
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ClientInit` if the HTTP client cannot be initialized.
    pub fn new() -> Result<Self, ApiError> {
        Self::builder().build()
    }

    /// Create a builder for configuring the client
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::new()
    }

    /// The configured base URL
    pub fn base_url(&self) -> &reqwest::Url {
        &self.base_url
    }

    /// Resolve path segments against the base URL
    ///
    /// Segments are percent-encoded, so a malformed id is sent verbatim as a
    /// single path segment. Any path prefix on the base URL is preserved.
    pub fn endpoint(&self, segments: &[&str]) -> Result<reqwest::Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Url(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `GET` the given path
    pub fn get(&self, segments: &[&str], auth: &Auth) -> Result<RawResponse, ApiError> {
        self.execute(Method::GET, segments, None, auth)
    }

    /// `POST` a JSON body to the given path
    pub fn post_json<B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
        auth: &Auth,
    ) -> Result<RawResponse, ApiError> {
        let encoded = serde_json::to_vec(body).map_err(ApiError::Encode)?;
        self.execute(Method::POST, segments, Some(encoded), auth)
    }

    /// `PATCH` the given path, with an optional JSON body
    pub fn patch_json<B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: Option<&B>,
        auth: &Auth,
    ) -> Result<RawResponse, ApiError> {
        let encoded = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(ApiError::Encode)?;
        self.execute(Method::PATCH, segments, encoded, auth)
    }

    fn execute(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<Vec<u8>>,
        auth: &Auth,
    ) -> Result<RawResponse, ApiError> {
        let url = self.endpoint(segments)?;
        debug!(%method, %url, "sending request");

        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .header(ACCEPT, json_header());
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, json_header()).body(body);
        }

        let response = auth.apply(request).send()?;
        let status = response.status();
        let text = response.text()?;
        debug!(%method, %url, status = status.as_u16(), bytes = text.len(), "received response");

        Ok(RawResponse::new(status, text))
    }
}

/// Builder for configuring an [`ApiClient`]
///
/// # Example
///
/// ```no_run
/// use stay_http_client::ApiClient;
/// use std::time::Duration;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ApiClient::builder()
///     .base_url("http://localhost:1234")?
///     .client_builder(
///         reqwest::blocking::Client::builder()
///             .timeout(Duration::from_secs(10))
///     )
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ApiClientBuilder {
    base_url: Option<reqwest::Url>,
    client_builder: Option<reqwest::blocking::ClientBuilder>,
    timeout: Option<Duration>,
}

impl ApiClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            base_url: None,
            client_builder: None,
            timeout: None,
        }
    }

    /// Set the API base URL
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn base_url(mut self, url: impl reqwest::IntoUrl) -> Result<Self, ApiError> {
        self.base_url = Some(url.into_url()?);
        Ok(self)
    }

    /// Set a custom HTTP client builder (timeouts, proxies, etc.)
    pub fn client_builder(mut self, builder: reqwest::blocking::ClientBuilder) -> Self {
        self.client_builder = Some(builder);
        self
    }

    /// Set the total timeout for each request
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ClientInit` if the HTTP client cannot be initialized.
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => reqwest::Url::parse(DEFAULT_BASE_URL)
                .map_err(|e| ApiError::ClientInit(e.to_string()))?,
        };

        let mut builder = self
            .client_builder
            .unwrap_or_else(|| reqwest::blocking::Client::builder().use_rustls_tls());
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ApiError::ClientInit(e.to_string()))?;

        Ok(ApiClient { client, base_url })
    }
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
