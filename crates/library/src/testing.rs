//! In-memory catalog fakes shared by the unit tests.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use gameshelf_steam::{AppData, AppEntry, QuerySummary, ReviewsResponse};
use gameshelf_steamgriddb::{ImageData, SearchResult};

use crate::error::LibraryError;
use crate::sources::{ArtworkSource, StoreCatalog};

fn mock_failure() -> LibraryError {
    LibraryError::Store(gameshelf_steam::Error::Api {
        status: 500,
        body: "mock failure".into(),
    })
}

/// Fake Steam that records every call.
#[derive(Default)]
pub(crate) struct MockStore {
    apps: Vec<AppEntry>,
    reviews: HashMap<u32, ReviewsResponse>,
    details: HashMap<u32, AppData>,
    headers: HashSet<u32>,
    failing: bool,
    calls: Mutex<Vec<String>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails as a transport error would.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn with_app(mut self, appid: u32, name: &str) -> Self {
        self.apps.push(AppEntry {
            appid,
            name: name.into(),
        });
        self
    }

    pub fn with_reviews(mut self, appid: u32, resp: ReviewsResponse) -> Self {
        self.reviews.insert(appid, resp);
        self
    }

    pub fn with_rating(self, appid: u32, description: &str, total: u64) -> Self {
        self.with_reviews(
            appid,
            ReviewsResponse {
                success: 1,
                query_summary: Some(QuerySummary {
                    review_score_desc: Some(description.into()),
                    total_reviews: total,
                }),
            },
        )
    }

    pub fn with_details(mut self, appid: u32, data: AppData) -> Self {
        self.details.insert(appid, data);
        self
    }

    pub fn with_header(mut self, appid: u32) -> Self {
        self.headers.insert(appid);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl StoreCatalog for MockStore {
    fn app_list(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<AppEntry>, LibraryError>> + Send + '_>> {
        self.record("app_list".into());
        Box::pin(async move {
            if self.failing {
                return Err(mock_failure());
            }
            Ok(self.apps.clone())
        })
    }

    fn reviews(
        &self,
        app_id: u32,
    ) -> Pin<Box<dyn Future<Output = Result<ReviewsResponse, LibraryError>> + Send + '_>> {
        self.record(format!("reviews:{app_id}"));
        Box::pin(async move {
            if self.failing {
                return Err(mock_failure());
            }
            Ok(self.reviews.get(&app_id).cloned().unwrap_or_default())
        })
    }

    fn app_details(
        &self,
        app_id: u32,
    ) -> Pin<Box<dyn Future<Output = Result<Option<AppData>, LibraryError>> + Send + '_>> {
        self.record(format!("details:{app_id}"));
        Box::pin(async move {
            if self.failing {
                return Err(mock_failure());
            }
            Ok(self.details.get(&app_id).cloned())
        })
    }

    fn header_image_url(&self, app_id: u32) -> String {
        format!("https://cdn.test/steam/apps/{app_id}/header.jpg")
    }

    fn header_image_exists(
        &self,
        app_id: u32,
    ) -> Pin<Box<dyn Future<Output = Result<bool, LibraryError>> + Send + '_>> {
        self.record(format!("header:{app_id}"));
        Box::pin(async move {
            if self.failing {
                return Err(mock_failure());
            }
            Ok(self.headers.contains(&app_id))
        })
    }
}

/// Fake SteamGridDB: every search returns the same results.
#[derive(Default)]
pub(crate) struct MockArt {
    results: Vec<SearchResult>,
    grids: HashMap<i32, Vec<ImageData>>,
    calls: Mutex<Vec<String>>,
}

impl MockArt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_game(mut self, id: i32, grid_url: &str) -> Self {
        self.results.push(SearchResult {
            id,
            name: format!("game {id}"),
        });
        self.grids.insert(
            id,
            vec![ImageData {
                id: id * 10,
                url: grid_url.into(),
            }],
        );
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ArtworkSource for MockArt {
    fn search<'a>(
        &'a self,
        name: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<SearchResult>, LibraryError>> + Send + 'a>> {
        self.calls.lock().unwrap().push(format!("search:{name}"));
        Box::pin(async move { Ok(self.results.clone()) })
    }

    fn grids(
        &self,
        game_id: i32,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ImageData>, LibraryError>> + Send + '_>> {
        self.calls.lock().unwrap().push(format!("grids:{game_id}"));
        Box::pin(async move { Ok(self.grids.get(&game_id).cloned().unwrap_or_default()) })
    }
}
