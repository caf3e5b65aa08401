//! Metadata fetchers.
//!
//! Each fetcher takes an optional app id and never fails: transport errors
//! and unexpected payloads are logged and replaced by a neutral value.

use std::sync::LazyLock;

use gameshelf_steam::{AppData, QuerySummary};
use regex::Regex;
use tracing::{debug, info, warn};

use crate::sources::{ArtworkSource, StoreCatalog};
use crate::types::{ReviewSummary, StoreDetails};

static STORAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\s*GB)").expect("storage pattern is valid"));

/// Fetches the all-time review summary.
///
/// No id, or a transport failure, yields [`ReviewSummary::Unknown`]. A
/// response without a score description, or with a failure flag, yields
/// [`ReviewSummary::NoUserReviews`].
pub async fn fetch_review(store: &dyn StoreCatalog, app_id: Option<u32>) -> ReviewSummary {
    let Some(app_id) = app_id else {
        return ReviewSummary::Unknown;
    };

    let resp = match store.reviews(app_id).await {
        Ok(resp) => resp,
        Err(e) => {
            warn!(app_id, error = %e, "failed to fetch reviews");
            return ReviewSummary::Unknown;
        }
    };

    if !resp.is_success() {
        debug!(app_id, success = resp.success, "review lookup unsuccessful");
        return ReviewSummary::NoUserReviews;
    }

    match resp.query_summary {
        Some(QuerySummary {
            review_score_desc: Some(description),
            total_reviews,
        }) if !description.is_empty() => {
            info!(app_id, review = %description, total_reviews, "found reviews");
            ReviewSummary::Rated {
                description,
                total: total_reviews,
            }
        }
        _ => ReviewSummary::NoUserReviews,
    }
}

/// Fetches store details, all-unknown on any failure.
pub async fn fetch_details(store: &dyn StoreCatalog, app_id: Option<u32>) -> StoreDetails {
    let Some(app_id) = app_id else {
        return StoreDetails::default();
    };

    match store.app_details(app_id).await {
        Ok(Some(data)) => {
            info!(app_id, "found store details");
            details_from(&data)
        }
        Ok(None) => {
            debug!(app_id, "store details lookup unsuccessful");
            StoreDetails::default()
        }
        Err(e) => {
            warn!(app_id, error = %e, "failed to fetch store details");
            StoreDetails::default()
        }
    }
}

fn details_from(data: &AppData) -> StoreDetails {
    StoreDetails {
        release_date: data.release_date().map(str::to_string),
        genres: data.genre_names(),
        short_description: data.short_description.clone(),
        screenshots: data.screenshot_urls(),
        video_url: data.trailer_url().map(str::to_string),
        storage: data.minimum_requirements().and_then(extract_storage),
    }
}

/// First `<number> GB` in a requirements blob, e.g. `"50 GB"`.
pub fn extract_storage(requirements: &str) -> Option<String> {
    STORAGE
        .captures(requirements)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Finds a cover image URL.
///
/// Tries the Steam header image first (existence probe only), then the
/// first grid of SteamGridDB's best name match. SteamGridDB is skipped
/// entirely when no `artwork` source is configured.
pub async fn fetch_cover(
    store: &dyn StoreCatalog,
    artwork: Option<&dyn ArtworkSource>,
    name: &str,
    app_id: Option<u32>,
) -> Option<String> {
    if let Some(app_id) = app_id {
        let url = store.header_image_url(app_id);
        match store.header_image_exists(app_id).await {
            Ok(true) => {
                info!(app_id, "found cover on steam");
                return Some(url);
            }
            Ok(false) => debug!(app_id, "steam header image not available"),
            Err(e) => warn!(app_id, error = %e, "failed to probe steam header image"),
        }
    }

    let Some(artwork) = artwork else {
        debug!(name, "no steamgriddb key configured, skipping cover fallback");
        return None;
    };

    let cover = steamgriddb_cover(artwork, name).await;
    if cover.is_none() {
        info!(name, "no cover found on any service");
    }
    cover
}

async fn steamgriddb_cover(artwork: &dyn ArtworkSource, name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }

    debug!(name, "falling back to steamgriddb search");
    let results = match artwork.search(name).await {
        Ok(results) => results,
        Err(e) => {
            warn!(name, error = %e, "steamgriddb search failed");
            return None;
        }
    };
    let game = results.first()?;

    match artwork.grids(game.id).await {
        Ok(grids) => {
            let url = grids.into_iter().map(|g| g.url).find(|u| !u.is_empty())?;
            info!(name, game_id = game.id, "found cover on steamgriddb");
            Some(url)
        }
        Err(e) => {
            warn!(name, game_id = game.id, error = %e, "steamgriddb grid lookup failed");
            None
        }
    }
}
