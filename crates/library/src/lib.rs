//! Local game library: folder scanning and Steam metadata enrichment.
//!
//! This crate implements the **enrichment pipeline** behind the dashboard:
//! every entry of the games directory is turned into a clean title, matched
//! against the Steam catalog, decorated with reviews, store details, cover
//! art and an installer path, and persisted in a flat JSON record cache.
//! It has no UI or HTTP server dependencies; network access goes through the
//! [`StoreCatalog`] and [`ArtworkSource`] traits.
//!
//! # Pipeline
//!
//! - **Normalize**: folder/archive name to display title
//! - **Match**: title to Steam app id by substring containment
//! - **Fetch**: reviews, details and cover, each degrading to a neutral default
//! - **Locate**: largest `.exe` under a game folder
//! - **Cache**: whole-file load and overwrite, keyed by title

pub mod cache;
pub mod error;
pub mod installer;
pub mod matcher;
pub mod metadata;
pub mod normalize;
pub mod pipeline;
pub mod sources;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

// Re-export primary types for convenience.
pub use cache::{RecordCache, RecordMap};
pub use error::LibraryError;
pub use installer::find_installer;
pub use matcher::CatalogMatcher;
pub use normalize::normalize_title;
pub use pipeline::{GameItem, ItemKind, Library, ScanReport, discover_items};
pub use sources::{ArtworkSource, StoreCatalog};
pub use types::{GameRecord, ReviewSummary, ScanConfig, StoreDetails, distinct_genres};
