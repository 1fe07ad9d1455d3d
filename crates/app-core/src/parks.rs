//! Park discovery and details
//!
//! [`ParkService`] combines the park lookup client with the wishlist: finding
//! parks around a position or a typed-in place, loading a park's details along
//! with its favorite status, and toggling that status.

use std::sync::Arc;

use places_client::http::DEFAULT_RADIUS_METERS;
use places_client::{Coordinate, LookupError, ParkLookup, ParkRecord};

use crate::favorites::{
    FavoriteChange, FavoriteEntry, FavoritesCollection, FavoritesError, FavoritesRepository,
};

/// Errors that can occur during park operations
#[derive(Debug, thiserror::Error)]
pub enum ParkServiceError {
    /// Lookup against the places service failed
    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// Wishlist operation failed
    #[error("Favorites error: {0}")]
    Favorites(#[from] FavoritesError),
}

/// Result type for park operations
pub type Result<T> = std::result::Result<T, ParkServiceError>;

/// Parks found around a searched location
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSearch {
    /// Where the query resolved to
    pub center: Coordinate,
    /// Parks around that point
    pub parks: Vec<ParkRecord>,
}

/// A park's full record and whether it is in the wishlist
#[derive(Debug, Clone, PartialEq)]
pub struct ParkDetails {
    /// Full park record
    pub park: ParkRecord,
    /// Whether the park is saved
    pub is_favorite: bool,
}

/// Park discovery backed by a lookup client and the wishlist
#[derive(Clone)]
pub struct ParkService {
    lookup: Arc<dyn ParkLookup>,
    favorites: FavoritesRepository,
    radius_meters: u32,
}

impl ParkService {
    /// Create a new park service
    pub fn new(lookup: Arc<dyn ParkLookup>, favorites: FavoritesRepository) -> Self {
        Self { lookup, favorites, radius_meters: DEFAULT_RADIUS_METERS }
    }

    /// Set the search radius used by [`Self::parks_near`] and [`Self::search_location`]
    pub fn with_radius(mut self, meters: u32) -> Self {
        self.radius_meters = meters;
        self
    }

    /// Search radius in meters
    pub fn radius_meters(&self) -> u32 {
        self.radius_meters
    }

    /// The wishlist repository
    pub fn favorites(&self) -> &FavoritesRepository {
        &self.favorites
    }

    /// Parks around a position
    pub async fn parks_near(&self, center: Coordinate) -> Result<Vec<ParkRecord>> {
        let parks = self
            .lookup
            .nearby_search(center.latitude, center.longitude, self.radius_meters)
            .await?;
        Ok(parks)
    }

    /// Resolve a typed-in place and list the parks around it
    pub async fn search_location(&self, query: &str) -> Result<LocationSearch> {
        let center = self.lookup.geocode(query).await?;
        let parks = self.parks_near(center).await?;

        tracing::debug!(found = parks.len(), "location search complete");
        Ok(LocationSearch { center, parks })
    }

    /// Load a park's details with its favorite status
    pub async fn park_details(&self, id: &str) -> Result<ParkDetails> {
        let park = self.lookup.place_details(id).await?;
        let is_favorite = self.favorites.is_favorite(&park.id).await?;
        Ok(ParkDetails { park, is_favorite })
    }

    /// Add the park to the wishlist, or remove it if already saved
    pub async fn toggle_favorite(&self, park: &ParkRecord) -> Result<FavoriteChange> {
        let change = self.favorites.toggle(FavoriteEntry::from(park)).await?;
        tracing::debug!(id = %park.id, ?change, "toggled favorite");
        Ok(change)
    }

    /// The saved parks
    pub async fn wishlist(&self) -> Result<FavoritesCollection> {
        Ok(self.favorites.load_all().await?)
    }

    /// Remove one park from the wishlist
    pub async fn remove_favorite(&self, id: &str) -> Result<FavoritesCollection> {
        Ok(self.favorites.remove(id).await?)
    }

    /// Remove every park from the wishlist
    pub async fn clear_wishlist(&self) -> Result<()> {
        Ok(self.favorites.clear().await?)
    }
}
