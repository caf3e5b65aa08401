//! Title to Steam app id resolution.
//!
//! Matching is plain substring containment on a folded key (lower-case,
//! ASCII alphanumerics only). The first catalog entry whose key contains the
//! title's key wins, so the result follows Steam's list order.

use gameshelf_steam::AppEntry;
use tracing::{debug, info, warn};

use crate::sources::StoreCatalog;

/// Folds a name for comparison: lower-case, ASCII letters and digits only.
pub fn match_key(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// First entry whose folded name contains the folded title.
///
/// A title that folds to nothing matches nothing.
pub fn find_app<'a>(apps: &'a [AppEntry], title: &str) -> Option<&'a AppEntry> {
    let key = match_key(title);
    // An empty key is a substring of every name; refuse it instead of taking the first entry.
    if key.is_empty() {
        return None;
    }
    apps.iter().find(|app| match_key(&app.name).contains(&key))
}

/// Resolves titles against the catalog, downloading it on first use.
///
/// One matcher lives for one pipeline pass, so the catalog is fetched at most
/// once per pass. A failed download is not remembered.
#[derive(Debug, Default)]
pub struct CatalogMatcher {
    apps: Option<Vec<AppEntry>>,
}

impl CatalogMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the app id for `title`, or `None` when nothing matches or the
    /// catalog could not be downloaded.
    pub async fn resolve(&mut self, store: &dyn StoreCatalog, title: &str) -> Option<u32> {
        if match_key(title).is_empty() {
            debug!(title, "title has no alphanumerics, skipping catalog lookup");
            return None;
        }

        if self.apps.is_none() {
            match store.app_list().await {
                Ok(apps) => self.apps = Some(apps),
                Err(e) => {
                    warn!(title, error = %e, "failed to download steam app list");
                    return None;
                }
            }
        }

        let apps = self.apps.as_deref().unwrap_or_default();
        match find_app(apps, title) {
            Some(app) => {
                info!(title, app = %app.name, app_id = app.appid, "matched steam app");
                Some(app.appid)
            }
            None => {
                debug!(title, "no steam app matched");
                None
            }
        }
    }
}
