//! Park records and the wire formats they are decoded from

use serde::{Deserialize, Serialize};

/// Number of reviews shown on a park's detail view
pub const DEFAULT_REVIEW_COUNT: usize = 5;

/// A WGS84 position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Check that both components are finite and within WGS84 bounds
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Format as the `lat,lng` pair the service expects
    pub fn as_query_value(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// Opaque reference to a place photo
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoReference(pub String);

impl PhotoReference {
    /// Get the raw reference
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A user review of a park
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Reviewer display name
    pub author: String,
    /// Star rating, 0 to 5
    pub rating: u8,
    /// Review body
    pub text: String,
}

/// A park as returned by the lookup service
///
/// Records from nearby search carry no photos or reviews; records from
/// place details are complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkRecord {
    /// External place identifier
    pub id: String,
    /// Park name
    pub name: String,
    /// Vicinity or formatted address
    pub address: Option<String>,
    /// Position of the park
    pub coordinate: Coordinate,
    /// Average rating, if the park has been rated
    pub rating: Option<f64>,
    /// Photo references
    pub photos: Vec<PhotoReference>,
    /// Reviews
    pub reviews: Vec<Review>,
}

impl ParkRecord {
    /// At most the first `count` reviews
    pub fn top_reviews(&self, count: usize) -> &[Review] {
        let end = count.min(self.reviews.len());
        &self.reviews[..end]
    }

    /// Check if the record carries photos
    pub fn has_photos(&self) -> bool {
        !self.photos.is_empty()
    }

    /// Check if the record carries reviews
    pub fn has_reviews(&self) -> bool {
        !self.reviews.is_empty()
    }
}

// =============================================================================
// Wire formats
// =============================================================================

/// `lat`/`lng` pair as the service encodes it
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
}

impl From<LatLng> for Coordinate {
    fn from(value: LatLng) -> Self {
        Coordinate::new(value.lat, value.lng)
    }
}

/// Geometry block of a place or geocode result
#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    /// Representative point
    pub location: LatLng,
}

/// Photo entry of a place result
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoResult {
    /// Photo reference token
    pub photo_reference: String,
}

/// Review entry of a place result
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewResult {
    /// Reviewer display name
    #[serde(default)]
    pub author_name: String,
    /// Star rating
    #[serde(default)]
    pub rating: u8,
    /// Review body
    #[serde(default)]
    pub text: String,
}

/// A place as encoded by nearby search and place details
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceResult {
    /// Place identifier
    pub place_id: Option<String>,
    /// Place name
    #[serde(default)]
    pub name: String,
    /// Short address
    pub vicinity: Option<String>,
    /// Full address
    pub formatted_address: Option<String>,
    /// Position
    pub geometry: Option<Geometry>,
    /// Average rating
    pub rating: Option<f64>,
    /// Photos (details only)
    #[serde(default)]
    pub photos: Vec<PhotoResult>,
    /// Reviews (details only)
    #[serde(default)]
    pub reviews: Vec<ReviewResult>,
}

impl PlaceResult {
    /// Normalize into a [`ParkRecord`]
    ///
    /// `fallback_id` is used when the result omits `place_id`. Returns `None`
    /// when neither an identifier nor a geometry is available.
    pub fn into_park(self, fallback_id: Option<&str>) -> Option<ParkRecord> {
        let id = self.place_id.or_else(|| fallback_id.map(str::to_string))?;
        let coordinate = self.geometry?.location.into();

        Some(ParkRecord {
            id,
            name: self.name,
            address: self.vicinity.or(self.formatted_address),
            coordinate,
            rating: self.rating,
            photos: self
                .photos
                .into_iter()
                .map(|p| PhotoReference(p.photo_reference))
                .collect(),
            reviews: self
                .reviews
                .into_iter()
                .map(|r| Review { author: r.author_name, rating: r.rating.min(5), text: r.text })
                .collect(),
        })
    }
}

/// Nearby search response body
#[derive(Debug, Clone, Deserialize)]
pub struct NearbySearchResponse {
    /// Service status
    pub status: String,
    /// Error detail for non-OK statuses
    pub error_message: Option<String>,
    /// Matching places
    #[serde(default)]
    pub results: Vec<PlaceResult>,
}

/// Place details response body
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDetailsResponse {
    /// Service status
    pub status: String,
    /// Error detail for non-OK statuses
    pub error_message: Option<String>,
    /// The place
    pub result: Option<PlaceResult>,
}

/// Geocode result entry
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    /// Position of the match
    pub geometry: Geometry,
}

/// Geocode response body
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    /// Service status
    pub status: String,
    /// Error detail for non-OK statuses
    pub error_message: Option<String>,
    /// Matches, best first
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}
