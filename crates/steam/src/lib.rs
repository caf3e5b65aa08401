//! Steam catalog client.
//!
//! Wraps the three public Steam endpoints the library needs: the full app
//! list (Web API), per-app review summaries and per-app store details
//! (Store API), plus an existence probe for the CDN header image.

pub mod client;
pub mod types;

pub use client::{Client, Error};
pub use types::{AppData, AppEntry, QuerySummary, ReviewsResponse};

/// Store page for an app.
pub fn store_page_url(app_id: u32) -> String {
    format!("https://store.steampowered.com/app/{app_id}")
}
