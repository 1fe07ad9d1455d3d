//! Places API client
//!
//! This crate looks parks up through a Google-Places-style JSON web service:
//! nearby search, place details and geocoding. Responses are normalized into
//! [`ParkRecord`] values. Every call is a single attempt; failures are
//! reported to the caller as a [`LookupError`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod http;
pub mod types;

pub use client::{ParkLookup, PlacesClient};
pub use http::{PlacesClientConfig, PlacesHttpClient, PlacesRequest};
pub use types::{Coordinate, ParkRecord, PhotoReference, Review};

/// Result type for lookup operations
pub type Result<T> = std::result::Result<T, LookupError>;

/// Error types for lookup operations
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// Transport-level failure (connection, timeout, TLS)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("HTTP error ({status}): {body}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        body: String,
    },

    /// The service answered with a non-OK status field
    #[error("API error ({status}): {message}")]
    Api {
        /// Service status string (e.g. "REQUEST_DENIED")
        status: String,
        /// Error message from the service
        message: String,
    },

    /// JSON decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Response decoded but is missing required data
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// No result for the query or identifier
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input, rejected before any request is made
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl LookupError {
    /// Check if this error means "no result" rather than a failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::NotFound(_))
    }
}
