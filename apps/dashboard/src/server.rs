//! HTTP dashboard.
//!
//! Routes:
//! - `GET /` runs a library pass and renders the page
//! - `GET /install/{name}` launches a cached game's installer
//! - `GET /static/default_cover.svg` serves the placeholder cover

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
};
use gameshelf_library::{ArtworkSource, Library, LibraryError};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::launch::{self, LaunchOutcome, LaunchResponse};
use crate::view::{DEFAULT_COVER_PATH, DEFAULT_COVER_SVG, DashboardPage};

/// Shared dashboard state.
pub struct AppState {
    pub library: Library,
    pub steam: gameshelf_steam::Client,
    pub artwork: Option<gameshelf_steamgriddb::Client>,
    /// Serializes passes so two page loads never rewrite the cache at once.
    scan_lock: Mutex<()>,
}

impl AppState {
    pub fn new(
        library: Library,
        steam: gameshelf_steam::Client,
        artwork: Option<gameshelf_steamgriddb::Client>,
    ) -> Self {
        Self {
            library,
            steam,
            artwork,
            scan_lock: Mutex::new(()),
        }
    }

    fn artwork(&self) -> Option<&dyn ArtworkSource> {
        self.artwork.as_ref().map(|c| c as &dyn ArtworkSource)
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/install/{name}", get(install))
        .route(DEFAULT_COVER_PATH, get(default_cover))
        .with_state(state)
}

/// Binds the listener, optionally opens a browser, and serves until shutdown.
pub async fn serve(state: Arc<AppState>, port: u16, open_browser: bool) -> anyhow::Result<()> {
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    let url = format!("http://{addr}/");
    info!(%url, "dashboard listening");

    if open_browser {
        tokio::spawn(open_browser_later(url));
    }

    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn open_browser_later(url: String) {
    tokio::time::sleep(Duration::from_secs(1)).await;
    if let Err(e) = open::that(&url) {
        warn!(%url, error = %e, "failed to open browser");
    }
}

async fn index(State(state): State<Arc<AppState>>) -> Response {
    let _pass = state.scan_lock.lock().await;

    let report = match state.library.records(&state.steam, state.artwork()).await {
        Ok(report) => report,
        Err(LibraryError::GamesDirNotFound(dir)) => {
            warn!(dir = %dir.display(), "games directory not found");
            return (
                StatusCode::NOT_FOUND,
                format!(
                    "Games directory not found: {}. Set games_dir in the configuration or GAMES_DIR.",
                    dir.display()
                ),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "library pass failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
    };

    let page = DashboardPage::new(
        &report.records,
        state.library.config().cache_only,
        report.reused,
        report.fetched,
    );
    match page.to_html() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(error = %e, "failed to render dashboard");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn install(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> (StatusCode, Json<LaunchResponse>) {
    let outcome = launch::launch_by_name(state.library.cache(), &name, launch::open_with_system);
    (status_for(&outcome), Json(outcome.response()))
}

fn status_for(outcome: &LaunchOutcome) -> StatusCode {
    match outcome {
        LaunchOutcome::Launched { .. } => StatusCode::OK,
        LaunchOutcome::NotFound => StatusCode::NOT_FOUND,
        LaunchOutcome::Failed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn default_cover() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/svg+xml")], DEFAULT_COVER_SVG)
}
