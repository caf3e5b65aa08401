//! API response types for SteamGridDB.

use serde::{Deserialize, Serialize};

/// A game matched by the autocomplete search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: i32,
    #[serde(default)]
    pub name: String,
}

/// A grid (cover) image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageData {
    pub id: i32,
    #[serde(default)]
    pub url: String,
}

/// `{"success": .., "data": ..}` envelope shared by every endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub data: T,
}
