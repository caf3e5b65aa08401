//! Steam API client.
//!
//! Async HTTP client using `reqwest`. No credential is needed for any of the
//! endpoints used here.

use reqwest::StatusCode;
use tracing::debug;

use crate::types::{AppData, AppDetailsResponse, AppEntry, AppListResponse, ReviewsResponse};

const DEFAULT_WEB_API_URL: &str = "https://api.steampowered.com";
const DEFAULT_STORE_URL: &str = "https://store.steampowered.com";
const DEFAULT_CDN_URL: &str = "https://cdn.akamai.steamstatic.com";

/// Errors from the Steam client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Steam Web/Store API client.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    web_api_url: String,
    store_url: String,
    cdn_url: String,
}

impl Client {
    pub fn new() -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("gameshelf/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            web_api_url: DEFAULT_WEB_API_URL.to_string(),
            store_url: DEFAULT_STORE_URL.to_string(),
            cdn_url: DEFAULT_CDN_URL.to_string(),
        })
    }

    /// Points every endpoint at one base URL (for testing).
    #[cfg(test)]
    pub(crate) fn with_base_url(mut self, url: String) -> Self {
        self.web_api_url = url.clone();
        self.store_url = url.clone();
        self.cdn_url = url;
        self
    }

    async fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<Vec<u8>, Error> {
        let resp = self.http.get(url).query(params).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp.bytes().await?.to_vec())
    }

    /// Downloads the full app catalog, in the order Steam returns it.
    pub async fn app_list(&self) -> Result<Vec<AppEntry>, Error> {
        let url = format!("{}/ISteamApps/GetAppList/v2/", self.web_api_url);
        let body = self.get(&url, &[]).await?;
        let resp: AppListResponse = serde_json::from_slice(&body)?;
        debug!(count = resp.applist.apps.len(), "downloaded steam app list");
        Ok(resp.applist.apps)
    }

    /// Returns the all-time review summary for an app.
    pub async fn reviews(&self, app_id: u32) -> Result<ReviewsResponse, Error> {
        let url = format!("{}/appreviews/{app_id}", self.store_url);
        let body = self
            .get(
                &url,
                &[
                    ("json", "1"),
                    ("filter", "all"),
                    ("language", "all"),
                    ("purchase_type", "all"),
                    ("num_per_page", "0"),
                ],
            )
            .await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Returns store details for an app.
    ///
    /// `Ok(None)` means Steam answered but flagged the lookup as unsuccessful.
    pub async fn app_details(&self, app_id: u32) -> Result<Option<AppData>, Error> {
        let url = format!("{}/api/appdetails", self.store_url);
        let id = app_id.to_string();
        let body = self.get(&url, &[("appids", id.as_str())]).await?;
        let mut resp: AppDetailsResponse = serde_json::from_slice(&body)?;

        Ok(resp
            .remove(&id)
            .filter(|entry| entry.success)
            .and_then(|entry| entry.data))
    }

    /// Conventional header image location for an app.
    pub fn header_image_url(&self, app_id: u32) -> String {
        format!("{}/steam/apps/{app_id}/header.jpg", self.cdn_url)
    }

    /// Probes the header image with a HEAD request (redirects followed).
    pub async fn header_image_exists(&self, app_id: u32) -> Result<bool, Error> {
        let resp = self.http.head(self.header_image_url(app_id)).send().await?;
        Ok(resp.status() == StatusCode::OK)
    }
}
