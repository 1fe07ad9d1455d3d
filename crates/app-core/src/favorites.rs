//! Favorite parks (wishlist) management
//!
//! This module owns the persisted wishlist: a single key-value record holding
//! an ordered JSON list of favorite parks. [`FavoritesRepository`] is the only
//! code path that writes that record. Every mutation reads the current list,
//! applies the change and writes the whole list back.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use places_client::ParkRecord;
use storage::{KeyValueStorage, StorageError};

/// Storage key of the wishlist record
pub const DEFAULT_FAVORITES_KEY: &str = "favorites";

/// Errors that can occur during favorites operations
#[derive(Debug, thiserror::Error)]
pub enum FavoritesError {
    /// The storage medium failed to read or write
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The collection could not be encoded for writing
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The entry cannot be stored
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),
}

/// Result type for favorites operations
pub type Result<T> = std::result::Result<T, FavoritesError>;

/// A park saved to the wishlist
///
/// This is a snapshot taken when the park was favorited; it is not refreshed
/// when the park's details change later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    /// Place identifier, unique within the wishlist
    pub id: String,

    /// Park name (may be empty)
    #[serde(default)]
    pub name: String,

    /// Vicinity or address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl FavoriteEntry {
    /// Create an entry without a location
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), location: None }
    }

    /// Set the location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Whether the id is non-blank and can be stored
    pub fn has_valid_id(&self) -> bool {
        !self.id.trim().is_empty()
    }
}

impl From<&ParkRecord> for FavoriteEntry {
    fn from(park: &ParkRecord) -> Self {
        Self { id: park.id.clone(), name: park.name.clone(), location: park.address.clone() }
    }
}

/// Ordered wishlist with unique ids
///
/// Insertion order is preserved. The collection never holds two entries with
/// the same id or an entry with a blank id; building one from a list keeps the
/// first occurrence of each id and skips blank ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<FavoriteEntry>", into = "Vec<FavoriteEntry>")]
pub struct FavoritesCollection {
    entries: Vec<FavoriteEntry>,
}

impl FavoritesCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the collection is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if an entry with `id` exists
    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Get the entry with `id`
    pub fn get(&self, id: &str) -> Option<&FavoriteEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Append `entry` unless its id is blank or already present
    ///
    /// Returns false (leaving the collection untouched) when the entry is rejected.
    pub fn insert(&mut self, entry: FavoriteEntry) -> bool {
        if !entry.has_valid_id() || self.contains(&entry.id) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Remove the entry with `id`, returning it if it was present
    pub fn remove(&mut self, id: &str) -> Option<FavoriteEntry> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(index))
    }

    /// Iterate over entries in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, FavoriteEntry> {
        self.entries.iter()
    }

    /// Ids in insertion order
    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.id.as_str()).collect()
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[FavoriteEntry] {
        &self.entries
    }

    /// Consume the collection, returning its entries
    pub fn into_entries(self) -> Vec<FavoriteEntry> {
        self.entries
    }
}

impl From<Vec<FavoriteEntry>> for FavoritesCollection {
    fn from(entries: Vec<FavoriteEntry>) -> Self {
        let mut seen = HashSet::with_capacity(entries.len());
        let entries = entries
            .into_iter()
            .filter(|entry| entry.has_valid_id() && seen.insert(entry.id.clone()))
            .collect();
        Self { entries }
    }
}

impl From<FavoritesCollection> for Vec<FavoriteEntry> {
    fn from(collection: FavoritesCollection) -> Self {
        collection.entries
    }
}

impl<'a> IntoIterator for &'a FavoritesCollection {
    type Item = &'a FavoriteEntry;
    type IntoIter = std::slice::Iter<'a, FavoriteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Outcome of toggling a park's favorite status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteChange {
    /// The park was added to the wishlist
    Added,
    /// The park was removed from the wishlist
    Removed,
}

impl FavoriteChange {
    /// Whether the park is a favorite after the change
    pub fn is_favorite(&self) -> bool {
        matches!(self, FavoriteChange::Added)
    }
}

/// Favorites repository configuration
#[derive(Debug, Clone)]
pub struct FavoritesConfig {
    /// Storage key of the wishlist record
    pub key: String,
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self { key: DEFAULT_FAVORITES_KEY.to_string() }
    }
}

impl FavoritesConfig {
    /// Create a configuration with a custom record key
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Decode a stored wishlist payload
///
/// Returns `None` when the payload is not a list of entries. Entries with a
/// blank id and repeated ids are dropped.
fn decode_collection(raw: &str) -> Option<FavoritesCollection> {
    let entries: Vec<FavoriteEntry> = serde_json::from_str(raw).ok()?;
    let stored = entries.len();
    let collection = FavoritesCollection::from(entries);

    if collection.len() < stored {
        tracing::warn!(
            dropped = stored - collection.len(),
            "dropped wishlist entries with empty or duplicate ids"
        );
    }

    Some(collection)
}

fn ensure_valid(entry: &FavoriteEntry) -> Result<()> {
    if entry.has_valid_id() {
        return Ok(());
    }
    Err(FavoritesError::InvalidEntry(format!("blank id for {:?}", entry.name)))
}

/// Sole gateway to the persisted wishlist
///
/// # Example
///
/// ```
/// # use app_core::favorites::{FavoriteEntry, FavoritesRepository};
/// # use storage::MemoryStorage;
/// # use std::sync::Arc;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let repository = FavoritesRepository::new(Arc::new(MemoryStorage::new()));
///
/// repository
///     .add(FavoriteEntry::new("p1", "Riverside Park").with_location("123 Main St"))
///     .await?;
/// assert!(repository.is_favorite("p1").await?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct FavoritesRepository {
    storage: Arc<dyn KeyValueStorage>,
    config: FavoritesConfig,
}

impl FavoritesRepository {
    /// Create a repository over `storage` with the default record key
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self::with_config(storage, FavoritesConfig::default())
    }

    /// Create a repository with a custom configuration
    pub fn with_config(storage: Arc<dyn KeyValueStorage>, config: FavoritesConfig) -> Self {
        Self { storage, config }
    }

    /// Storage key of the wishlist record
    pub fn key(&self) -> &str {
        &self.config.key
    }

    /// Load the wishlist
    ///
    /// A missing or unreadable record yields an empty collection; only a
    /// failure of the storage medium itself is an error.
    pub async fn load_all(&self) -> Result<FavoritesCollection> {
        let Some(raw) = self.storage.get_item(self.key()).await? else {
            return Ok(FavoritesCollection::new());
        };

        match decode_collection(&raw) {
            Some(collection) => Ok(collection),
            None => {
                tracing::warn!(key = %self.key(), "stored wishlist is malformed, treating as empty");
                Ok(FavoritesCollection::new())
            }
        }
    }

    /// Check if a park is in the wishlist
    pub async fn is_favorite(&self, id: &str) -> Result<bool> {
        Ok(self.load_all().await?.contains(id))
    }

    /// Number of parks in the wishlist
    pub async fn len(&self) -> Result<usize> {
        Ok(self.load_all().await?.len())
    }

    /// Check if the wishlist is empty
    pub async fn is_empty(&self) -> Result<bool> {
        Ok(self.load_all().await?.is_empty())
    }

    /// Add a park to the wishlist
    ///
    /// If a park with the same id is already saved, the stored entry is kept
    /// and nothing is written. An entry with a blank id is rejected with
    /// [`FavoritesError::InvalidEntry`] before storage is touched.
    pub async fn add(&self, entry: FavoriteEntry) -> Result<FavoritesCollection> {
        ensure_valid(&entry)?;
        let mut collection = self.load_all().await?;
        let id = entry.id.clone();

        if !collection.insert(entry) {
            tracing::debug!(id = %id, "park already in wishlist");
            return Ok(collection);
        }

        self.persist(&collection).await?;
        tracing::debug!(id = %id, total = collection.len(), "added park to wishlist");
        Ok(collection)
    }

    /// Remove a park from the wishlist
    ///
    /// Removing an id that is not saved is not an error.
    pub async fn remove(&self, id: &str) -> Result<FavoritesCollection> {
        let mut collection = self.load_all().await?;
        let removed = collection.remove(id).is_some();

        self.persist(&collection).await?;
        tracing::debug!(id = %id, removed, total = collection.len(), "removed park from wishlist");
        Ok(collection)
    }

    /// Add the park if absent, remove it if present
    pub async fn toggle(&self, entry: FavoriteEntry) -> Result<FavoriteChange> {
        ensure_valid(&entry)?;
        let mut collection = self.load_all().await?;

        let change = if collection.remove(&entry.id).is_some() {
            FavoriteChange::Removed
        } else {
            collection.insert(entry);
            FavoriteChange::Added
        };

        self.persist(&collection).await?;
        Ok(change)
    }

    /// Delete the wishlist record
    pub async fn clear(&self) -> Result<()> {
        self.storage.remove_item(self.key()).await?;
        tracing::info!(key = %self.key(), "wishlist cleared");
        Ok(())
    }

    async fn persist(&self, collection: &FavoritesCollection) -> Result<()> {
        let payload = serde_json::to_string(collection)?;
        self.storage.set_item(self.key(), payload).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;
    use places_client::Coordinate;
    use storage::MemoryStorage;

    mock! {
        pub Storage {}

        #[async_trait]
        impl KeyValueStorage for Storage {
            async fn get_item(&self, key: &str) -> storage::Result<Option<String>>;
            async fn set_item(&self, key: &str, value: String) -> storage::Result<()>;
            async fn remove_item(&self, key: &str) -> storage::Result<bool>;
        }
    }

    fn make_repository() -> (FavoritesRepository, MemoryStorage) {
        let storage = MemoryStorage::new();
        (FavoritesRepository::new(Arc::new(storage.clone())), storage)
    }

    fn riverside() -> FavoriteEntry {
        FavoriteEntry::new("p1", "Riverside Park").with_location("123 Main St")
    }

    fn lakeside() -> FavoriteEntry {
        FavoriteEntry::new("p2", "Lakeside Park").with_location("9 Shore Rd")
    }

    #[tokio::test]
    async fn test_add_then_list() {
        let (repository, _) = make_repository();

        repository.add(riverside()).await.unwrap();

        let favorites = repository.load_all().await.unwrap();
        assert_eq!(favorites.entries(), &[riverside()]);
    }

    #[tokio::test]
    async fn test_add_then_is_favorite() {
        let (repository, _) = make_repository();

        assert!(!repository.is_favorite("p1").await.unwrap());
        repository.add(riverside()).await.unwrap();
        assert!(repository.is_favorite("p1").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_add_keeps_original() {
        let (repository, _) = make_repository();
        repository.add(riverside()).await.unwrap();

        let changed = FavoriteEntry::new("p1", "Changed").with_location("X");
        let favorites = repository.add(changed).await.unwrap();

        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites.get("p1"), Some(&riverside()));
        assert_eq!(repository.load_all().await.unwrap(), favorites);
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let (once, _) = make_repository();
        let (twice, _) = make_repository();

        once.add(riverside()).await.unwrap();
        twice.add(riverside()).await.unwrap();
        twice.add(riverside()).await.unwrap();

        assert_eq!(once.load_all().await.unwrap(), twice.load_all().await.unwrap());
    }

    #[tokio::test]
    async fn test_remove_nonexistent() {
        let (repository, _) = make_repository();

        let favorites = repository.remove("p9").await.unwrap();
        assert!(favorites.is_empty());
        assert!(repository.load_all().await.unwrap().is_empty());
        assert!(!repository.is_favorite("p9").await.unwrap());
    }

    #[tokio::test]
    async fn test_remove_preserves_order() {
        let (repository, _) = make_repository();
        repository.add(riverside()).await.unwrap();
        repository.add(lakeside()).await.unwrap();
        repository.add(FavoriteEntry::new("p3", "Hilltop")).await.unwrap();

        let favorites = repository.remove("p2").await.unwrap();
        assert_eq!(favorites.ids(), vec!["p1", "p3"]);
        assert!(!repository.is_favorite("p2").await.unwrap());
    }

    #[tokio::test]
    async fn test_clear_with_items() {
        let (repository, storage) = make_repository();
        repository.add(riverside()).await.unwrap();
        repository.add(lakeside()).await.unwrap();

        repository.clear().await.unwrap();

        assert!(repository.load_all().await.unwrap().is_empty());
        assert!(storage.is_empty().await);
    }

    #[tokio::test]
    async fn test_clear_when_empty() {
        let (repository, _) = make_repository();
        repository.clear().await.unwrap();
        assert!(repository.is_empty().await.unwrap());
    }

    #[tokio::test]
    async fn test_uniqueness_over_operation_sequence() {
        let (repository, _) = make_repository();
        let ids = ["a", "b", "a", "c", "b", "a", "d", "c"];

        for (step, id) in ids.iter().enumerate() {
            if step % 3 == 2 {
                repository.remove(id).await.unwrap();
            } else {
                repository.add(FavoriteEntry::new(*id, format!("Park {}", id))).await.unwrap();
            }

            let favorites = repository.load_all().await.unwrap();
            let unique: HashSet<&str> = favorites.ids().into_iter().collect();
            assert_eq!(unique.len(), favorites.len(), "duplicate after step {}", step);
        }
    }

    #[tokio::test]
    async fn test_round_trip_preserves_order() {
        let (repository, storage) = make_repository();
        for entry in [lakeside(), riverside(), FavoriteEntry::new("p3", "")] {
            repository.add(entry).await.unwrap();
        }
        let written = repository.load_all().await.unwrap();

        let reopened = FavoritesRepository::new(Arc::new(storage));
        assert_eq!(reopened.load_all().await.unwrap(), written);
        assert_eq!(written.ids(), vec!["p2", "p1", "p3"]);
    }

    #[tokio::test]
    async fn test_persisted_layout() {
        let (repository, storage) = make_repository();
        repository.add(riverside()).await.unwrap();
        repository.add(FavoriteEntry::new("p2", "No Address")).await.unwrap();

        let raw = storage.get_item(DEFAULT_FAVORITES_KEY).await.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                { "id": "p1", "name": "Riverside Park", "location": "123 Main St" },
                { "id": "p2", "name": "No Address" }
            ])
        );
    }

    #[tokio::test]
    async fn test_malformed_payload_is_empty() {
        let storage = MemoryStorage::with_items([(DEFAULT_FAVORITES_KEY, "{not json")]);
        let repository = FavoritesRepository::new(Arc::new(storage.clone()));

        assert!(repository.load_all().await.unwrap().is_empty());

        // The next write replaces the corrupt payload with a valid list
        repository.add(riverside()).await.unwrap();
        let raw = storage.get_item(DEFAULT_FAVORITES_KEY).await.unwrap().unwrap();
        assert!(serde_json::from_str::<Vec<FavoriteEntry>>(&raw).is_ok());
    }

    #[tokio::test]
    async fn test_wrong_shape_payload_is_empty() {
        let storage = MemoryStorage::with_items([(DEFAULT_FAVORITES_KEY, r#"{"id":"p1"}"#)]);
        let repository = FavoritesRepository::new(Arc::new(storage));
        assert!(repository.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_legacy_duplicates_are_collapsed() {
        let payload = r#"[
            {"id":"p1","name":"Riverside Park","location":"123 Main St"},
            {"id":"p1","name":"Riverside Park again"},
            {"id":"","name":"Blank"},
            {"id":"p2"}
        ]"#;
        let storage = MemoryStorage::with_items([(DEFAULT_FAVORITES_KEY, payload)]);
        let repository = FavoritesRepository::new(Arc::new(storage));

        let favorites = repository.load_all().await.unwrap();
        assert_eq!(favorites.ids(), vec!["p1", "p2"]);
        assert_eq!(favorites.get("p1").unwrap().name, "Riverside Park");
        assert_eq!(favorites.get("p2").unwrap().name, "");
        assert_eq!(favorites.get("p2").unwrap().location, None);
    }

    #[tokio::test]
    async fn test_null_location_is_accepted() {
        let payload = r#"[{"id":"p1","name":"Riverside Park","location":null}]"#;
        let storage = MemoryStorage::with_items([(DEFAULT_FAVORITES_KEY, payload)]);
        let repository = FavoritesRepository::new(Arc::new(storage));

        let favorites = repository.load_all().await.unwrap();
        assert_eq!(favorites.get("p1").unwrap().location, None);
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_state() {
        let (repository, _) = make_repository();
        repository.add(lakeside()).await.unwrap();

        let first = repository.toggle(riverside()).await.unwrap();
        assert_eq!(first, FavoriteChange::Added);
        assert!(first.is_favorite());
        assert!(repository.is_favorite("p1").await.unwrap());

        let second = repository.toggle(riverside()).await.unwrap();
        assert_eq!(second, FavoriteChange::Removed);
        assert!(!repository.is_favorite("p1").await.unwrap());
        assert_eq!(repository.load_all().await.unwrap().entries(), &[lakeside()]);
    }

    #[tokio::test]
    async fn test_custom_key() {
        let storage = MemoryStorage::new();
        let repository = FavoritesRepository::with_config(
            Arc::new(storage.clone()),
            FavoritesConfig::new("wishlist:v2"),
        );

        repository.add(riverside()).await.unwrap();
        assert_eq!(repository.key(), "wishlist:v2");
        assert!(storage.get_item("wishlist:v2").await.unwrap().is_some());
        assert!(storage.get_item(DEFAULT_FAVORITES_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_read_failure_is_storage_error() {
        let mut mock = MockStorage::new();
        mock.expect_get_item()
            .returning(|_| Err(StorageError::Unavailable("device storage offline".to_string())));
        mock.expect_set_item().never();

        let repository = FavoritesRepository::new(Arc::new(mock));

        assert!(matches!(repository.load_all().await, Err(FavoritesError::Storage(_))));
        assert!(matches!(repository.add(riverside()).await, Err(FavoritesError::Storage(_))));
        assert!(matches!(repository.remove("p1").await, Err(FavoritesError::Storage(_))));
    }

    #[tokio::test]
    async fn test_write_failure_is_storage_error() {
        let mut mock = MockStorage::new();
        mock.expect_get_item().returning(|_| Ok(None));
        mock.expect_set_item()
            .times(1)
            .returning(|_, _| Err(StorageError::Unavailable("disk full".to_string())));

        let repository = FavoritesRepository::new(Arc::new(mock));

        let err = repository.add(riverside()).await.unwrap_err();
        assert!(err.to_string().contains("disk full"));
    }

    #[tokio::test]
    async fn test_mutation_writes_full_collection_once() {
        let existing = serde_json::to_string(&vec![riverside()]).unwrap();

        let mut mock = MockStorage::new();
        mock.expect_get_item()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        mock.expect_set_item()
            .withf(|key, value| {
                key.to_string() == DEFAULT_FAVORITES_KEY
                    && serde_json::from_str::<Vec<FavoriteEntry>>(value)
                        .map(|entries| entries.len() == 2)
                        .unwrap_or(false)
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let repository = FavoritesRepository::new(Arc::new(mock));
        let favorites = repository.add(lakeside()).await.unwrap();
        assert_eq!(favorites.ids(), vec!["p1", "p2"]);
    }

    #[tokio::test]
    async fn test_duplicate_add_does_not_write() {
        let existing = serde_json::to_string(&vec![riverside()]).unwrap();

        let mut mock = MockStorage::new();
        mock.expect_get_item().returning(move |_| Ok(Some(existing.clone())));
        mock.expect_set_item().never();

        let repository = FavoritesRepository::new(Arc::new(mock));
        let favorites = repository.add(riverside()).await.unwrap();
        assert_eq!(favorites.len(), 1);
    }

    #[tokio::test]
    async fn test_add_blank_id_is_rejected() {
        let (repository, storage) = make_repository();

        for id in ["", " ", "\t"] {
            let err = repository.add(FavoriteEntry::new(id, "Blank")).await.unwrap_err();
            assert!(matches!(err, FavoritesError::InvalidEntry(_)), "id {:?}", id);
        }

        assert!(repository.load_all().await.unwrap().is_empty());
        assert!(storage.is_empty().await);
    }

    #[tokio::test]
    async fn test_add_then_load_matches_after_blank_attempt() {
        let (repository, _) = make_repository();
        let returned = repository.add(riverside()).await.unwrap();

        assert!(repository.add(FavoriteEntry::new(" ", "Blank")).await.is_err());

        assert_eq!(repository.load_all().await.unwrap(), returned);
        assert!(!repository.is_favorite(" ").await.unwrap());
    }

    #[tokio::test]
    async fn test_toggle_blank_id_is_rejected() {
        let mut mock = MockStorage::new();
        mock.expect_get_item().never();
        mock.expect_set_item().never();

        let repository = FavoritesRepository::new(Arc::new(mock));
        let err = repository.toggle(FavoriteEntry::new("", "Blank")).await.unwrap_err();
        assert!(matches!(err, FavoritesError::InvalidEntry(_)));
    }

    #[tokio::test]
    async fn test_clear_failure_is_storage_error() {
        let mut mock = MockStorage::new();
        mock.expect_remove_item()
            .withf(|key| key.to_string() == DEFAULT_FAVORITES_KEY)
            .times(1)
            .returning(|_| Err(StorageError::Unavailable("device storage offline".to_string())));

        let repository = FavoritesRepository::new(Arc::new(mock));
        assert!(matches!(repository.clear().await, Err(FavoritesError::Storage(_))));
    }

    #[tokio::test]
    async fn test_toggle_write_failure_is_storage_error() {
        let existing = serde_json::to_string(&vec![riverside()]).unwrap();

        let mut mock = MockStorage::new();
        mock.expect_get_item().returning(move |_| Ok(Some(existing.clone())));
        mock.expect_set_item()
            .times(2)
            .returning(|_, _| Err(StorageError::Unavailable("disk full".to_string())));

        let repository = FavoritesRepository::new(Arc::new(mock));

        // Removing an existing park and adding a new one both write
        assert!(matches!(repository.toggle(riverside()).await, Err(FavoritesError::Storage(_))));
        assert!(matches!(repository.toggle(lakeside()).await, Err(FavoritesError::Storage(_))));
    }

    #[test]
    fn test_entry_from_park_record() {
        let park = ParkRecord {
            id: "ChIJ-gage".to_string(),
            name: "Gage Park".to_string(),
            address: Some("1000 Main St E".to_string()),
            coordinate: Coordinate::new(43.24, -79.82),
            rating: Some(4.6),
            photos: vec![],
            reviews: vec![],
        };

        let entry = FavoriteEntry::from(&park);
        assert_eq!(entry, FavoriteEntry::new("ChIJ-gage", "Gage Park").with_location("1000 Main St E"));
    }

    #[test]
    fn test_collection_insert_rejects_duplicates() {
        let mut collection = FavoritesCollection::new();
        assert!(collection.insert(riverside()));
        assert!(!collection.insert(FavoriteEntry::new("p1", "Other")));
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.get("p1").unwrap().name, "Riverside Park");
    }

    #[test]
    fn test_collection_rejects_blank_ids() {
        let mut collection = FavoritesCollection::new();
        assert!(!collection.insert(FavoriteEntry::new("", "Blank")));
        assert!(!collection.insert(FavoriteEntry::new("  ", "Blank")));
        assert!(collection.is_empty());

        let from_list = FavoritesCollection::from(vec![FavoriteEntry::new(" ", "Blank"), riverside()]);
        assert_eq!(from_list.entries(), &[riverside()]);

        let decoded: FavoritesCollection =
            serde_json::from_str(r#"[{"id":"","name":"Blank"},{"id":"p1","name":"Riverside Park","location":"123 Main St"}]"#)
                .unwrap();
        assert_eq!(decoded, from_list);
    }

    #[test]
    fn test_collection_remove() {
        let mut collection = FavoritesCollection::from(vec![riverside(), lakeside()]);
        assert_eq!(collection.remove("p1"), Some(riverside()));
        assert_eq!(collection.remove("p1"), None);
        assert_eq!(collection.iter().count(), 1);
    }

    #[test]
    fn test_decode_collection() {
        assert!(decode_collection("[]").unwrap().is_empty());
        assert!(decode_collection("null").is_none());
        assert!(decode_collection("").is_none());
        assert_eq!(decode_collection(r#"[{"id":"x","name":"X"}]"#).unwrap().len(), 1);
    }
}
