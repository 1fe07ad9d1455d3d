//! Park lookup over the places web service
//!
//! [`ParkLookup`] is the seam the rest of the application depends on;
//! [`PlacesClient`] implements it against the HTTP service.

use async_trait::async_trait;

use crate::http::{PlacesClientConfig, PlacesHttpClient, PlacesRequest};
use crate::types::{
    Coordinate, GeocodeResponse, NearbySearchResponse, ParkRecord, PhotoReference,
    PlaceDetailsResponse,
};
use crate::{LookupError, Result};

/// Nearby search endpoint
pub const NEARBY_SEARCH_ENDPOINT: &str = "place/nearbysearch/json";

/// Place details endpoint
pub const PLACE_DETAILS_ENDPOINT: &str = "place/details/json";

/// Geocoding endpoint
pub const GEOCODE_ENDPOINT: &str = "geocode/json";

/// Place photo endpoint
pub const PHOTO_ENDPOINT: &str = "place/photo";

/// Default photo width in pixels
pub const DEFAULT_PHOTO_WIDTH: u32 = 400;

/// Park lookup operations
#[async_trait]
pub trait ParkLookup: Send + Sync {
    /// Parks within `radius_meters` of a position (no photos or reviews)
    async fn nearby_search(
        &self,
        latitude: f64,
        longitude: f64,
        radius_meters: u32,
    ) -> Result<Vec<ParkRecord>>;

    /// Full record for a place identifier
    async fn place_details(&self, id: &str) -> Result<ParkRecord>;

    /// Position of the best match for a free-text location
    async fn geocode(&self, query: &str) -> Result<Coordinate>;
}

/// How a service status string should be treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ServiceStatus {
    Ok,
    ZeroResults,
}

fn check_status(status: &str, error_message: Option<String>, subject: &str) -> Result<ServiceStatus> {
    match status {
        "OK" => Ok(ServiceStatus::Ok),
        "ZERO_RESULTS" => Ok(ServiceStatus::ZeroResults),
        "NOT_FOUND" => Err(LookupError::NotFound(subject.to_string())),
        other => Err(LookupError::Api {
            status: other.to_string(),
            message: error_message.unwrap_or_default(),
        }),
    }
}

/// [`ParkLookup`] backed by the places HTTP service
///
/// # Examples
/// ```no_run
/// use places_client::{ParkLookup, PlacesClient, PlacesClientConfig};
///
/// async fn example() -> Result<(), Box<dyn std::error::Error>> {
///     let client = PlacesClient::new(PlacesClientConfig::new("api-key"))?;
///
///     let here = client.geocode("Hamilton, ON").await?;
///     let parks = client.nearby_search(here.latitude, here.longitude, 5000).await?;
///     for park in parks {
///         println!("{} ({})", park.name, park.id);
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PlacesClient {
    http: PlacesHttpClient,
}

impl PlacesClient {
    /// Create a new client
    pub fn new(config: PlacesClientConfig) -> Result<Self> {
        Ok(Self { http: PlacesHttpClient::new(config)? })
    }

    /// Get the client configuration
    pub fn config(&self) -> &PlacesClientConfig {
        self.http.config()
    }

    /// URL of a photo, scaled to at most `max_width` pixels
    pub fn photo_url(&self, photo: &PhotoReference, max_width: u32) -> String {
        let config = self.config();
        format!(
            "{}?maxwidth={}&photoreference={}&key={}",
            config.endpoint_url(PHOTO_ENDPOINT),
            max_width,
            urlencoding::encode(photo.as_str()),
            urlencoding::encode(&config.api_key),
        )
    }
}

#[async_trait]
impl ParkLookup for PlacesClient {
    async fn nearby_search(
        &self,
        latitude: f64,
        longitude: f64,
        radius_meters: u32,
    ) -> Result<Vec<ParkRecord>> {
        let center = Coordinate::new(latitude, longitude);
        if !center.is_valid() {
            return Err(LookupError::InvalidInput(format!(
                "coordinate out of range: {}",
                center.as_query_value()
            )));
        }
        if radius_meters == 0 {
            return Err(LookupError::InvalidInput("radius must be positive".to_string()));
        }

        let request = PlacesRequest::new(NEARBY_SEARCH_ENDPOINT)
            .param("location", center.as_query_value())
            .param("radius", radius_meters.to_string())
            .param("type", self.config().place_type.clone());

        let response: NearbySearchResponse = self.http.get(request).await?;
        let subject = center.as_query_value();

        if check_status(&response.status, response.error_message, &subject)?
            == ServiceStatus::ZeroResults
        {
            return Ok(Vec::new());
        }

        let total = response.results.len();
        let parks: Vec<ParkRecord> = response
            .results
            .into_iter()
            .filter_map(|result| result.into_park(None))
            .collect();

        if parks.len() < total {
            tracing::warn!(
                skipped = total - parks.len(),
                "nearby search results without place id or geometry were skipped"
            );
        }

        Ok(parks)
    }

    async fn place_details(&self, id: &str) -> Result<ParkRecord> {
        if id.trim().is_empty() {
            return Err(LookupError::InvalidInput("place id must not be empty".to_string()));
        }

        let request = PlacesRequest::new(PLACE_DETAILS_ENDPOINT).param("placeid", id);
        let response: PlaceDetailsResponse = self.http.get(request).await?;

        if check_status(&response.status, response.error_message, id)?
            == ServiceStatus::ZeroResults
        {
            return Err(LookupError::NotFound(id.to_string()));
        }

        let result = response.result.ok_or_else(|| LookupError::NotFound(id.to_string()))?;
        result.into_park(Some(id)).ok_or_else(|| {
            LookupError::MalformedResponse(format!("place {} has no geometry", id))
        })
    }

    async fn geocode(&self, query: &str) -> Result<Coordinate> {
        let query = query.trim();
        if query.is_empty() {
            return Err(LookupError::InvalidInput("location query must not be empty".to_string()));
        }

        let request = PlacesRequest::new(GEOCODE_ENDPOINT).param("address", query);
        let response: GeocodeResponse = self.http.get(request).await?;

        check_status(&response.status, response.error_message, query)?;

        response
            .results
            .into_iter()
            .next()
            .map(|result| result.geometry.location.into())
            .ok_or_else(|| LookupError::NotFound(query.to_string()))
    }
}
