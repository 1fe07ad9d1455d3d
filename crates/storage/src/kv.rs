//! Key-value storage for device-local records
//!
//! This module defines the [`KeyValueStorage`] seam used by the favorites
//! repository and a sled-backed implementation of it. Values are opaque
//! strings; callers own their serialization.

use async_trait::async_trait;
use sled::Db;
use std::sync::Arc;
use thiserror::Error;

/// Storage error types
#[derive(Debug, Error)]
pub enum StorageError {
    /// Sled database error
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The storage medium cannot be reached
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Invalid key
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// A stored value is not valid UTF-8
    #[error("Corrupt value under key {key}: {source}")]
    CorruptValue {
        /// Key of the unreadable record
        key: String,
        /// Decoding failure
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;

/// Asynchronous string key-value storage
///
/// Mirrors the device key-value stores mobile platforms expose: one string
/// value per key, absence is not an error.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set_item(&self, key: &str, value: String) -> Result<()>;

    /// Delete the value under `key`; returns whether a value existed
    async fn remove_item(&self, key: &str) -> Result<bool>;

    /// Check if a value exists under `key`
    async fn contains_item(&self, key: &str) -> Result<bool> {
        Ok(self.get_item(key).await?.is_some())
    }
}

pub(crate) fn validate_key(key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(StorageError::InvalidKey("key must not be empty".to_string()));
    }
    Ok(())
}

/// Key-value store configuration
#[derive(Debug, Clone)]
pub struct KvConfig {
    /// Database path
    pub path: String,
    /// Cache capacity in bytes
    pub cache_capacity: u64,
    /// Enable compression
    pub use_compression: bool,
    /// Background flush interval in milliseconds
    ///
    /// `None` disables sled's flusher thread and flushes after every write instead.
    pub flush_every_ms: Option<u64>,
}

impl Default for KvConfig {
    fn default() -> Self {
        Self {
            path: "park_view_kv.db".to_string(),
            cache_capacity: 8 * 1024 * 1024, // 8MB
            use_compression: true,
            flush_every_ms: None,
        }
    }
}

impl KvConfig {
    /// Create a new configuration with a custom path
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), ..Default::default() }
    }

    /// Set cache capacity in bytes
    pub fn cache_capacity(mut self, bytes: u64) -> Self {
        self.cache_capacity = bytes;
        self
    }

    /// Enable or disable compression
    pub fn use_compression(mut self, enabled: bool) -> Self {
        self.use_compression = enabled;
        self
    }

    /// Set flush interval in milliseconds
    pub fn flush_every_ms(mut self, ms: Option<u64>) -> Self {
        self.flush_every_ms = ms;
        self
    }
}

/// Sled-backed [`KeyValueStorage`]
#[derive(Clone)]
pub struct SledStorage {
    db: Arc<Db>,
    flush_on_write: bool,
}

impl SledStorage {
    /// Open (or create) the store described by `config`
    pub fn open(config: &KvConfig) -> Result<Self> {
        let db = sled::Config::new()
            .path(&config.path)
            .cache_capacity(config.cache_capacity)
            .use_compression(config.use_compression)
            .flush_every_ms(config.flush_every_ms)
            .open()?;
        tracing::debug!(path = %config.path, "opened key-value store");

        Ok(Self { db: Arc::new(db), flush_on_write: config.flush_every_ms.is_none() })
    }

    /// Create a temporary store that is removed on drop (for testing)
    pub fn temporary() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;

        Ok(Self { db: Arc::new(db), flush_on_write: false })
    }

    /// Number of records in the store
    pub fn len(&self) -> usize {
        self.db.len()
    }

    /// Check if the store holds no records
    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }

    async fn flush_if_needed(&self) -> Result<()> {
        if self.flush_on_write {
            self.db.flush_async().await?;
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStorage for SledStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let Some(bytes) = self.db.get(key.as_bytes())? else {
            return Ok(None);
        };

        match String::from_utf8(bytes.to_vec()) {
            Ok(value) => Ok(Some(value)),
            Err(source) => {
                tracing::warn!(key = %key, len = bytes.len(), "stored value is not valid UTF-8");
                Err(StorageError::CorruptValue { key: key.to_string(), source })
            }
        }
    }

    async fn set_item(&self, key: &str, value: String) -> Result<()> {
        validate_key(key)?;
        self.db.insert(key.as_bytes(), value.into_bytes())?;
        self.flush_if_needed().await
    }

    async fn remove_item(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        let existed = self.db.remove(key.as_bytes())?.is_some();
        self.flush_if_needed().await?;
        Ok(existed)
    }

    async fn contains_item(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        Ok(self.db.contains_key(key.as_bytes())?)
    }
}
