//! Error types for library operations.

use std::path::PathBuf;

/// Errors produced while scanning or persisting the library.
///
/// Catalog and artwork failures only travel as far as the fetchers, which
/// replace them with neutral defaults.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("games directory not found: {}", .0.display())]
    GamesDirNotFound(PathBuf),

    #[error("steam: {0}")]
    Store(#[from] gameshelf_steam::Error),

    #[error("steamgriddb: {0}")]
    Artwork(#[from] gameshelf_steamgriddb::Error),
}
