//! SteamGridDB API client for cover art lookup.
//!
//! Thin async client for the [SteamGridDB](https://www.steamgriddb.com) API
//! v2. Only name search and grid listing are exposed; the library uses them
//! as the fallback cover source when Steam has no header image.

pub mod client;
pub mod types;

pub use client::{Client, Error};
pub use types::{ImageData, SearchResult};
