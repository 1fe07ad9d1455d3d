//! Core application logic for Park View
//!
//! This crate contains the wishlist repository and the park discovery
//! service the presentation layer calls into.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod favorites;
pub mod parks;

pub use favorites::{
    FavoriteChange, FavoriteEntry, FavoritesCollection, FavoritesConfig, FavoritesError,
    FavoritesRepository,
};
pub use parks::{LocationSearch, ParkDetails, ParkService, ParkServiceError};
