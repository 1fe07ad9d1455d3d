//! Park View
//!
//! Entry point for hosts embedding the park discovery and wishlist core:
//! configuration, wiring of the concrete storage and lookup backends, and
//! logging setup.

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::sync::Arc;

pub use app_core::{
    FavoriteChange, FavoriteEntry, FavoritesCollection, FavoritesConfig, FavoritesError,
    FavoritesRepository, LocationSearch, ParkDetails, ParkService, ParkServiceError,
};
pub use places_client::{
    Coordinate, LookupError, ParkLookup, ParkRecord, PlacesClient, PlacesClientConfig,
};
pub use storage::{KeyValueStorage, KvConfig, MemoryStorage, SledStorage, StorageError};

/// Errors raised while assembling the application
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The key-value store could not be opened
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The places client could not be built
    #[error("Lookup client error: {0}")]
    Lookup(#[from] LookupError),
}

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// On-device key-value store
    pub storage: KvConfig,
    /// Places service client
    pub places: PlacesClientConfig,
    /// Wishlist record settings
    pub favorites: FavoritesConfig,
}

impl AppConfig {
    /// Create a configuration with a places API key and defaults elsewhere
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { places: PlacesClientConfig::new(api_key), ..Default::default() }
    }

    /// Set the key-value store configuration
    pub fn with_storage(mut self, storage: KvConfig) -> Self {
        self.storage = storage;
        self
    }

    /// Set the places client configuration
    pub fn with_places(mut self, places: PlacesClientConfig) -> Self {
        self.places = places;
        self
    }

    /// Set the wishlist configuration
    pub fn with_favorites(mut self, favorites: FavoritesConfig) -> Self {
        self.favorites = favorites;
        self
    }

    /// Open the store, build the places client and return the park service
    pub fn open(&self) -> Result<ParkService, AppError> {
        let storage = SledStorage::open(&self.storage)?;
        let lookup = PlacesClient::new(self.places.clone())?;
        tracing::info!(path = %self.storage.path, key = %self.favorites.key, "park view opened");

        Ok(self.build(Arc::new(storage), Arc::new(lookup)))
    }

    /// Build the park service over caller-supplied backends
    pub fn build(
        &self,
        storage: Arc<dyn KeyValueStorage>,
        lookup: Arc<dyn ParkLookup>,
    ) -> ParkService {
        let favorites = FavoritesRepository::with_config(storage, self.favorites.clone());
        ParkService::new(lookup, favorites).with_radius(self.places.default_radius_meters)
    }
}

/// Install a global `tracing` subscriber
///
/// `RUST_LOG` takes precedence over `default_directive` (e.g. `"park_view=info"`).
/// Returns false if a subscriber was already installed.
pub fn init_logging(default_directive: &str) -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
