//! Storage layer for Park View
//!
//! This crate provides the key-value storage seam the favorites repository
//! persists through, with sled-backed and in-memory implementations.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod kv;
pub mod memory;

pub use kv::{KeyValueStorage, KvConfig, Result, SledStorage, StorageError};
pub use memory::MemoryStorage;
