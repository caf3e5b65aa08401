//! SteamGridDB API client.
//!
//! Async HTTP client using `reqwest` with Bearer token authentication.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::debug;

use crate::types::{ApiResponse, ImageData, SearchResult};

const DEFAULT_BASE_URL: &str = "https://www.steamgriddb.com/api/v2";

/// Errors from the SteamGridDB client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid API key")]
    InvalidKey,
}

/// SteamGridDB API client.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Creates a new client with the given API key.
    pub fn new(api_key: &str) -> Result<Self, Error> {
        if api_key.trim().is_empty() {
            return Err(Error::InvalidKey);
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|_| Error::InvalidKey)?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Sets a custom base URL (for testing).
    #[cfg(test)]
    pub(crate) fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Performs an authenticated GET request.
    async fn get(&self, endpoint: &str) -> Result<Vec<u8>, Error> {
        let url = format!("{}{}", self.base_url, endpoint);
        let resp = self.http.get(&url).send().await?;
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

    /// Searches for games by name, best match first.
    pub async fn search(&self, term: &str) -> Result<Vec<SearchResult>, Error> {
        let encoded = utf8_percent_encode(term, NON_ALPHANUMERIC).to_string();
        let body = self.get(&format!("/search/autocomplete/{encoded}")).await?;
        let resp: ApiResponse<Vec<SearchResult>> = serde_json::from_slice(&body)?;
        debug!(term, results = resp.data.len(), "steamgriddb search");
        Ok(resp.data)
    }

    /// Returns grid images for a game.
    pub async fn grids(&self, game_id: i32) -> Result<Vec<ImageData>, Error> {
        let body = self.get(&format!("/grids/game/{game_id}")).await?;
        let resp: ApiResponse<Vec<ImageData>> = serde_json::from_slice(&body)?;
        if !resp.success && !resp.errors.is_empty() {
            debug!(game_id, errors = ?resp.errors, "steamgriddb reported errors");
        }
        Ok(resp.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answers one request with the given status and body, then yields the
    /// raw request text.
    async fn mock_server(status: u16, body: &str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let url = format!("http://127.0.0.1:{port}");
        let body = body.to_string();

        let handle = tokio::spawn(async move {
            let Ok((mut stream, _)) = listener.accept().await else {
                return String::new();
            };
            let mut buf = vec![0u8; 8192];
            let n = stream.read(&mut buf).await.unwrap_or(0);
            let request = String::from_utf8_lossy(&buf[..n]).to_string();

            let resp = format!(
                "HTTP/1.1 {status} Mock\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = stream.write_all(resp.as_bytes()).await;
            let _ = stream.shutdown().await;
            request
        });

        (url, handle)
    }

    #[tokio::test]
    async fn search_encodes_term_and_sends_bearer() {
        let json = r#"{"success":true,"data":[
            {"id":1,"name":"Cool Game","types":["steam"],"verified":true},
            {"id":2,"name":"Cool Game 2"}
        ]}"#;
        let (url, handle) = mock_server(200, json).await;

        let client = Client::new("test-key").unwrap().with_base_url(url);
        let results = client.search("Cool Game").await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, 1);
        assert_eq!(results[1].name, "Cool Game 2");

        let request = handle.await.unwrap();
        assert!(request.starts_with("GET /search/autocomplete/Cool%20Game "));
        assert!(request.to_lowercase().contains("authorization: bearer test-key"));
    }

    #[tokio::test]
    async fn grids_returns_images() {
        let json = r#"{"success":true,"data":[
            {"id":100,"url":"https://cdn/grid.png","width":600,"height":900}
        ]}"#;
        let (url, handle) = mock_server(200, json).await;

        let client = Client::new("test-key").unwrap().with_base_url(url);
        let grids = client.grids(42).await.unwrap();

        assert_eq!(grids.len(), 1);
        assert_eq!(grids[0].url, "https://cdn/grid.png");

        let request = handle.await.unwrap();
        assert!(request.starts_with("GET /grids/game/42 "));
    }

    #[tokio::test]
    async fn unauthorized_is_api_error() {
        let (url, handle) =
            mock_server(401, r#"{"success":false,"errors":["Unauthorized"]}"#).await;

        let client = Client::new("bad-key").unwrap().with_base_url(url);
        let err = client.search("test").await.unwrap_err();
        assert!(
            matches!(err, Error::Api { status: 401, .. }),
            "unexpected error: {err}"
        );

        handle.abort();
    }

    #[test]
    fn empty_key_rejected() {
        assert!(matches!(Client::new("  "), Err(Error::InvalidKey)));
    }

    #[test]
    fn key_with_newline_rejected() {
        assert!(matches!(Client::new("abc\ndef"), Err(Error::InvalidKey)));
    }
}
