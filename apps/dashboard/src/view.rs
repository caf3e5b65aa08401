//! HTML rendering of the library.
//!
//! Records are flattened into display-ready cards so the template only
//! prints strings.

use askama::Template;
use gameshelf_library::{GameRecord, distinct_genres};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

/// Placeholder shown for records without a cover.
pub const DEFAULT_COVER_PATH: &str = "/static/default_cover.svg";

pub const DEFAULT_COVER_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="460" height="215" viewBox="0 0 460 215">
<rect width="460" height="215" fill="#2a2f3a"/>
<rect x="180" y="62" width="100" height="70" rx="10" fill="none" stroke="#8a93a6" stroke-width="6"/>
<circle cx="207" cy="97" r="8" fill="#8a93a6"/>
<circle cx="253" cy="97" r="8" fill="#8a93a6"/>
<text x="230" y="170" font-family="sans-serif" font-size="18" fill="#8a93a6" text-anchor="middle">No cover</text>
</svg>
"##;

const UNKNOWN: &str = "N/A";

/// One game as shown on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct GameCard {
    pub name: String,
    pub install_url: String,
    pub has_installer: bool,
    pub cover_url: String,
    pub catalog_url: String,
    pub review: String,
    pub review_count: u64,
    pub release_date: String,
    pub genres: Vec<String>,
    /// Genres joined with `|`, for the client-side filter.
    pub genre_key: String,
    pub short_description: String,
    pub screenshots: Vec<String>,
    /// Empty when there is no trailer.
    pub video_url: String,
    pub storage: String,
}

impl GameCard {
    pub fn from_record(record: &GameRecord) -> Self {
        let details = &record.details;
        Self {
            name: record.name.clone(),
            install_url: install_url(&record.name),
            has_installer: record.installer_path.is_some(),
            cover_url: record
                .cover_url
                .clone()
                .unwrap_or_else(|| DEFAULT_COVER_PATH.to_string()),
            catalog_url: record.catalog_url.clone(),
            review: record.review.label().to_string(),
            review_count: record.review.total(),
            release_date: or_unknown(details.release_date.as_deref()),
            genres: details.genres.clone(),
            genre_key: details.genres.join("|"),
            short_description: details.short_description.clone(),
            screenshots: details.screenshots.clone(),
            video_url: details.video_url.clone().unwrap_or_default(),
            storage: or_unknown(details.storage.as_deref()),
        }
    }
}

fn or_unknown(value: Option<&str>) -> String {
    value.unwrap_or(UNKNOWN).to_string()
}

/// Path of the install action for a game name.
pub fn install_url(name: &str) -> String {
    format!("/install/{}", utf8_percent_encode(name, NON_ALPHANUMERIC))
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct DashboardPage {
    pub games: Vec<GameCard>,
    pub genres: Vec<String>,
    pub cache_only: bool,
    pub reused: usize,
    pub fetched: usize,
    pub version: &'static str,
}

impl DashboardPage {
    pub fn new(records: &[GameRecord], cache_only: bool, reused: usize, fetched: usize) -> Self {
        Self {
            games: records.iter().map(GameCard::from_record).collect(),
            genres: distinct_genres(records),
            cache_only,
            reused,
            fetched,
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    pub fn to_html(&self) -> Result<String, askama::Error> {
        self.render()
    }
}
