//! HTTP transport for the places web service
//!
//! This module holds the request builder, the client configuration and the
//! thin reqwest wrapper that executes a request and decodes the JSON body.
//! It knows nothing about parks; see [`crate::client`] for that.

use reqwest::{Client as ReqwestClient, Response as ReqwestResponse};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

use crate::{LookupError, Result};

/// Default service root for the places and geocoding endpoints
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Default search radius used by nearby search (5 km)
pub const DEFAULT_RADIUS_METERS: u32 = 5000;

/// Default place type filter for nearby search
pub const DEFAULT_PLACE_TYPE: &str = "park";

// =============================================================================
// Request Types
// =============================================================================

/// A GET request against one endpoint of the service
///
/// The API key is added by the client when the request is executed.
#[derive(Debug, Clone)]
pub struct PlacesRequest {
    /// Endpoint path relative to the base URL (e.g., "place/details/json")
    pub endpoint: String,
    /// Query parameters
    pub params: HashMap<String, String>,
}

impl PlacesRequest {
    /// Create a new request for `endpoint`
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into(), params: HashMap::new() }
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

// =============================================================================
// Client Configuration
// =============================================================================

/// Configuration for the places client
#[derive(Clone)]
pub struct PlacesClientConfig {
    /// Base service URL
    pub base_url: String,
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Radius used when callers do not pass one
    pub default_radius_meters: u32,
    /// Place type filter for nearby search
    pub place_type: String,
}

impl std::fmt::Debug for PlacesClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacesClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("default_radius_meters", &self.default_radius_meters)
            .field("place_type", &self.place_type)
            .finish()
    }
}

impl Default for PlacesClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(30),
            user_agent: format!("Park-View/{}", env!("CARGO_PKG_VERSION")),
            default_radius_meters: DEFAULT_RADIUS_METERS,
            place_type: DEFAULT_PLACE_TYPE.to_string(),
        }
    }
}

impl PlacesClientConfig {
    /// Create a new config with an API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), ..Default::default() }
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the default nearby-search radius
    pub fn with_default_radius(mut self, meters: u32) -> Self {
        self.default_radius_meters = meters;
        self
    }

    /// Set the place type filter
    pub fn with_place_type(mut self, place_type: impl Into<String>) -> Self {
        self.place_type = place_type.into();
        self
    }

    /// Build the absolute URL of an endpoint
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint.trim_start_matches('/'))
    }
}

// =============================================================================
// HTTP Client
// =============================================================================

/// Executes [`PlacesRequest`]s and decodes their JSON bodies
#[derive(Debug, Clone)]
pub struct PlacesHttpClient {
    client: ReqwestClient,
    config: PlacesClientConfig,
}

impl PlacesHttpClient {
    /// Create a new HTTP client
    pub fn new(config: PlacesClientConfig) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// Execute a GET request and decode the body as `T`
    pub async fn get<T>(&self, request: PlacesRequest) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.config.endpoint_url(&request.endpoint);
        tracing::debug!(endpoint = %request.endpoint, params = ?request.params, "places request");

        let response = self
            .client
            .get(&url)
            .query(&request.params)
            .query(&[("key", self.config.api_key.as_str())])
            .send()
            .await?;

        self.parse_response(response).await
    }

    async fn parse_response<T>(&self, response: ReqwestResponse) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Http { status: status.as_u16(), body });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Get the client configuration
    pub fn config(&self) -> &PlacesClientConfig {
        &self.config
    }
}

// =============================================================================
// Tests
// =============================================================================
