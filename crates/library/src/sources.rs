//! Network seams used by the pipeline.
//!
//! The dashboard passes the real Steam and SteamGridDB clients; tests pass
//! in-memory fakes.

use std::future::Future;
use std::pin::Pin;

use gameshelf_steam::{AppData, AppEntry, ReviewsResponse};
use gameshelf_steamgriddb::{ImageData, SearchResult};

use crate::error::LibraryError;

/// Abstract access to the primary catalog (Steam).
pub trait StoreCatalog: Send + Sync {
    /// Downloads the full app catalog.
    fn app_list(&self)
    -> Pin<Box<dyn Future<Output = Result<Vec<AppEntry>, LibraryError>> + Send + '_>>;

    /// Fetches the review summary for an app.
    fn reviews(
        &self,
        app_id: u32,
    ) -> Pin<Box<dyn Future<Output = Result<ReviewsResponse, LibraryError>> + Send + '_>>;

    /// Fetches store details; `Ok(None)` when the store flags the lookup as failed.
    fn app_details(
        &self,
        app_id: u32,
    ) -> Pin<Box<dyn Future<Output = Result<Option<AppData>, LibraryError>> + Send + '_>>;

    /// Conventional header image URL for an app.
    fn header_image_url(&self, app_id: u32) -> String;

    /// Checks that the header image exists without downloading it.
    fn header_image_exists(
        &self,
        app_id: u32,
    ) -> Pin<Box<dyn Future<Output = Result<bool, LibraryError>> + Send + '_>>;
}

/// Abstract access to the secondary art database (SteamGridDB).
pub trait ArtworkSource: Send + Sync {
    /// Searches games by name, best match first.
    fn search<'a>(
        &'a self,
        name: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<SearchResult>, LibraryError>> + Send + 'a>>;

    /// Lists grid images for a game of this service.
    fn grids(
        &self,
        game_id: i32,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ImageData>, LibraryError>> + Send + '_>>;
}

impl StoreCatalog for gameshelf_steam::Client {
    fn app_list(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<AppEntry>, LibraryError>> + Send + '_>> {
        Box::pin(async move { Ok(gameshelf_steam::Client::app_list(self).await?) })
    }

    fn reviews(
        &self,
        app_id: u32,
    ) -> Pin<Box<dyn Future<Output = Result<ReviewsResponse, LibraryError>> + Send + '_>> {
        Box::pin(async move { Ok(gameshelf_steam::Client::reviews(self, app_id).await?) })
    }

    fn app_details(
        &self,
        app_id: u32,
    ) -> Pin<Box<dyn Future<Output = Result<Option<AppData>, LibraryError>> + Send + '_>> {
        Box::pin(async move { Ok(gameshelf_steam::Client::app_details(self, app_id).await?) })
    }

    fn header_image_url(&self, app_id: u32) -> String {
        gameshelf_steam::Client::header_image_url(self, app_id)
    }

    fn header_image_exists(
        &self,
        app_id: u32,
    ) -> Pin<Box<dyn Future<Output = Result<bool, LibraryError>> + Send + '_>> {
        Box::pin(async move {
            Ok(gameshelf_steam::Client::header_image_exists(self, app_id).await?)
        })
    }
}

impl ArtworkSource for gameshelf_steamgriddb::Client {
    fn search<'a>(
        &'a self,
        name: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<SearchResult>, LibraryError>> + Send + 'a>> {
        Box::pin(async move { Ok(gameshelf_steamgriddb::Client::search(self, name).await?) })
    }

    fn grids(
        &self,
        game_id: i32,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ImageData>, LibraryError>> + Send + '_>> {
        Box::pin(async move { Ok(gameshelf_steamgriddb::Client::grids(self, game_id).await?) })
    }
}
