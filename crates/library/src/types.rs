//! Domain types for the game library.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Archive extensions treated as single-file games.
pub const DEFAULT_ARCHIVE_EXTENSIONS: [&str; 2] = ["rar", "zip"];

/// Immutable scan settings, resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    /// Root directory whose top-level entries are the games.
    pub games_dir: PathBuf,
    /// Only the first `limit` entries (by name) are processed.
    pub limit: Option<usize>,
    /// Serve the persisted cache without scanning or fetching anything.
    pub cache_only: bool,
    /// Lower-case extensions, without the dot.
    pub archive_extensions: Vec<String>,
}

impl ScanConfig {
    pub fn new(games_dir: impl Into<PathBuf>) -> Self {
        Self {
            games_dir: games_dir.into(),
            limit: None,
            cache_only: false,
            archive_extensions: DEFAULT_ARCHIVE_EXTENSIONS
                .iter()
                .map(|e| (*e).to_string())
                .collect(),
        }
    }

    /// A limit of zero means no limit.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit.filter(|n| *n > 0);
        self
    }

    pub fn with_cache_only(mut self, cache_only: bool) -> Self {
        self.cache_only = cache_only;
        self
    }

    /// Whether a file name carries one of the archive extensions.
    pub fn is_archive(&self, file_name: &str) -> bool {
        let lower = file_name.to_lowercase();
        self.archive_extensions
            .iter()
            .any(|ext| lower.ends_with(&format!(".{ext}")))
    }
}

/// Review state of a game.
///
/// `Unknown` means nothing could be fetched; `NoUserReviews` means Steam
/// answered but has no score for the app.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReviewSummary {
    #[default]
    Unknown,
    NoUserReviews,
    Rated { description: String, total: u64 },
}

impl ReviewSummary {
    /// Text shown to users.
    pub fn label(&self) -> &str {
        match self {
            Self::Unknown => "N/A",
            Self::NoUserReviews => "No User Reviews",
            Self::Rated { description, .. } => description,
        }
    }

    pub fn total(&self) -> u64 {
        match self {
            Self::Rated { total, .. } => *total,
            _ => 0,
        }
    }
}

/// Store page details. `Default` is the all-unknown value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDetails {
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub screenshots: Vec<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    /// Minimum storage requirement, e.g. `"50 GB"`.
    #[serde(default)]
    pub storage: Option<String>,
}

/// A fully assembled, cacheable game entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Normalized title; the cache key.
    pub name: String,
    #[serde(default)]
    pub cover_url: Option<String>,
    /// Steam store page, or a web search link when the game was not matched.
    pub catalog_url: String,
    #[serde(default)]
    pub review: ReviewSummary,
    /// Installer executable, or the archive itself for archive entries.
    #[serde(default)]
    pub installer_path: Option<PathBuf>,
    #[serde(flatten)]
    pub details: StoreDetails,
}

/// Sorted, de-duplicated genres across all records.
pub fn distinct_genres<'a>(records: impl IntoIterator<Item = &'a GameRecord>) -> Vec<String> {
    records
        .into_iter()
        .flat_map(|r| r.details.genres.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
