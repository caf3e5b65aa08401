//! API response types for the Steam Web and Store APIs.
//!
//! Every field is defaulted: Steam omits keys freely and the callers treat a
//! missing value the same as an absent one.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One entry of the full app catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppEntry {
    pub appid: u32,
    #[serde(default)]
    pub name: String,
}

/// `ISteamApps/GetAppList/v2` wrapper (internal).
#[derive(Debug, Default, Deserialize)]
pub(crate) struct AppListResponse {
    #[serde(default)]
    pub applist: AppList,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AppList {
    #[serde(default)]
    pub apps: Vec<AppEntry>,
}

/// Response of the `appreviews` endpoint with `num_per_page=0`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReviewsResponse {
    /// `1` on success; anything else is a failed lookup.
    #[serde(default)]
    pub success: i64,
    #[serde(default)]
    pub query_summary: Option<QuerySummary>,
}

impl ReviewsResponse {
    pub fn is_success(&self) -> bool {
        self.success == 1
    }
}

/// All-time review statistics.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QuerySummary {
    /// Human label such as "Very Positive". Absent for apps without a score.
    #[serde(default)]
    pub review_score_desc: Option<String>,
    #[serde(default)]
    pub total_reviews: u64,
}

/// `appdetails` responses are keyed by the stringified app id.
pub(crate) type AppDetailsResponse = HashMap<String, AppDetailsEntry>;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AppDetailsEntry {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<AppData>,
}

/// Store details for a single app.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppData {
    #[serde(default)]
    pub release_date: Option<ReleaseDate>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub screenshots: Vec<Screenshot>,
    #[serde(default)]
    pub movies: Vec<Movie>,
    /// An object with `minimum`/`recommended` HTML blobs, or `[]` when the
    /// store has no requirements for the app.
    #[serde(default)]
    pub pc_requirements: serde_json::Value,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReleaseDate {
    #[serde(default)]
    pub coming_soon: bool,
    #[serde(default)]
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Genre {
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Screenshot {
    #[serde(default)]
    pub path_full: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Movie {
    #[serde(default)]
    pub mp4: Option<MovieSources>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MovieSources {
    #[serde(default)]
    pub max: Option<String>,
}

impl AppData {
    /// Release date text, if the store has a non-empty one.
    pub fn release_date(&self) -> Option<&str> {
        self.release_date
            .as_ref()
            .map(|r| r.date.as_str())
            .filter(|d| !d.is_empty())
    }

    pub fn genre_names(&self) -> Vec<String> {
        self.genres.iter().map(|g| g.description.clone()).collect()
    }

    pub fn screenshot_urls(&self) -> Vec<String> {
        self.screenshots
            .iter()
            .filter(|s| !s.path_full.is_empty())
            .map(|s| s.path_full.clone())
            .collect()
    }

    /// Highest-quality MP4 of the first movie.
    pub fn trailer_url(&self) -> Option<&str> {
        self.movies
            .first()
            .and_then(|m| m.mp4.as_ref())
            .and_then(|s| s.max.as_deref())
    }

    /// Minimum PC requirements text. `None` when the store sent `[]`.
    pub fn minimum_requirements(&self) -> Option<&str> {
        self.pc_requirements.get("minimum").and_then(|v| v.as_str())
    }
}
