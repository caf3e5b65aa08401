//! Enrichment pipeline: directory listing to cached records.
//!
//! Games are processed one after another. A title already in the cache is
//! carried over untouched; any other title is matched, fetched and
//! assembled into a new record. The cache is then rewritten with exactly the
//! titles seen in this pass.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::cache::{RecordCache, RecordMap};
use crate::error::LibraryError;
use crate::installer::find_installer;
use crate::matcher::CatalogMatcher;
use crate::metadata::{fetch_cover, fetch_details, fetch_review};
use crate::normalize::normalize_title;
use crate::sources::{ArtworkSource, StoreCatalog};
use crate::types::{GameRecord, ScanConfig};

/// Kind of top-level entry in the games directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Directory,
    Archive,
}

/// A top-level entry of the games directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameItem {
    pub path: PathBuf,
    pub kind: ItemKind,
}

impl GameItem {
    /// Entry name, without the extension for archives.
    pub fn base_name(&self) -> String {
        let name = match self.kind {
            ItemKind::Directory => self.path.file_name(),
            ItemKind::Archive => self.path.file_stem(),
        };
        name.map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn title(&self) -> String {
        normalize_title(&self.base_name())
    }

    /// Directories are searched for an executable; archives are their own installer.
    pub fn installer(&self) -> Option<PathBuf> {
        match self.kind {
            ItemKind::Directory => find_installer(&self.path),
            ItemKind::Archive => Some(self.path.clone()),
        }
    }
}

/// Outcome of one pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanReport {
    /// Records in title order.
    pub records: Vec<GameRecord>,
    /// Titles carried over from the cache.
    pub reused: usize,
    /// Titles assembled from fresh lookups.
    pub fetched: usize,
}

/// Lists the games directory (top level only).
///
/// Keeps subdirectories and files with an archive extension, sorted by name,
/// truncated to the configured limit.
pub fn discover_items(config: &ScanConfig) -> Result<Vec<GameItem>, LibraryError> {
    let root = &config.games_dir;
    if !root.is_dir() {
        return Err(LibraryError::GamesDirNotFound(root.clone()));
    }

    let mut items = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            items.push(GameItem {
                path,
                kind: ItemKind::Directory,
            });
        } else if config.is_archive(&entry.file_name().to_string_lossy()) {
            items.push(GameItem {
                path,
                kind: ItemKind::Archive,
            });
        }
    }

    items.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    if let Some(limit) = config.limit {
        items.truncate(limit);
    }

    debug!(dir = %root.display(), count = items.len(), "discovered game entries");
    Ok(items)
}

/// Store page link when matched, web search link otherwise.
pub fn catalog_url(title: &str, app_id: Option<u32>) -> String {
    match app_id {
        Some(id) => gameshelf_steam::store_page_url(id),
        None => format!(
            "https://www.google.com/search?q={}+game",
            title.replace(' ', "+")
        ),
    }
}

/// The game library: scan settings plus the record cache.
pub struct Library {
    config: ScanConfig,
    cache: RecordCache,
}

impl Library {
    pub fn new(config: ScanConfig, cache: RecordCache) -> Self {
        Self { config, cache }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn cache(&self) -> &RecordCache {
        &self.cache
    }

    /// Returns the records to show, honouring the cache-only setting.
    pub async fn records(
        &self,
        store: &dyn StoreCatalog,
        artwork: Option<&dyn ArtworkSource>,
    ) -> Result<ScanReport, LibraryError> {
        if self.config.cache_only {
            Ok(self.cached())
        } else {
            self.sync(store, artwork).await
        }
    }

    /// Cache-only mode: the persisted records, untouched. No disk scan, no network.
    pub fn cached(&self) -> ScanReport {
        let records: Vec<GameRecord> = self.cache.load().into_values().collect();
        info!(count = records.len(), "serving records from cache only");
        ScanReport {
            reused: records.len(),
            fetched: 0,
            records,
        }
    }

    /// Full pass: scan, enrich cache misses, rewrite the cache.
    pub async fn sync(
        &self,
        store: &dyn StoreCatalog,
        artwork: Option<&dyn ArtworkSource>,
    ) -> Result<ScanReport, LibraryError> {
        let items = discover_items(&self.config)?;
        let previous = self.cache.load();
        let mut next = RecordMap::new();
        let mut matcher = CatalogMatcher::new();
        let mut report = ScanReport::default();

        for item in &items {
            let title = item.title();
            info!(title = %title, "processing");

            if let Some(record) = previous.get(&title) {
                info!(title = %title, "found in cache");
                next.insert(title, record.clone());
                report.reused += 1;
                continue;
            }

            if next.contains_key(&title) {
                warn!(
                    title = %title,
                    path = %item.path.display(),
                    "title already produced by another entry, replacing it"
                );
            }

            let record = enrich(item, &title, store, artwork, &mut matcher).await;
            next.insert(title, record);
            report.fetched += 1;
        }

        self.cache.save(&next)?;
        info!(
            reused = report.reused,
            fetched = report.fetched,
            dropped = previous.keys().filter(|k| !next.contains_key(*k)).count(),
            "scan complete"
        );

        report.records = next.into_values().collect();
        Ok(report)
    }
}

/// Assembles a new record for a cache miss.
async fn enrich(
    item: &GameItem,
    title: &str,
    store: &dyn StoreCatalog,
    artwork: Option<&dyn ArtworkSource>,
    matcher: &mut CatalogMatcher,
) -> GameRecord {
    info!(title, "fetching metadata");
    let app_id = matcher.resolve(store, title).await;

    let (cover_url, review, details) = tokio::join!(
        fetch_cover(store, artwork, title, app_id),
        fetch_review(store, app_id),
        fetch_details(store, app_id),
    );

    if app_id.is_none() {
        info!(title, "no steam app id, using a web search link");
    }

    GameRecord {
        name: title.to_string(),
        cover_url,
        catalog_url: catalog_url(title, app_id),
        review,
        installer_path: item.installer(),
        details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockArt, MockStore};
    use crate::types::ReviewSummary;
    use gameshelf_steam::AppData;
    use std::fs;
    use tempfile::TempDir;

    struct Fixture {
        _tmp: TempDir,
        games: PathBuf,
        cache_path: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let tmp = TempDir::new().unwrap();
            let games = tmp.path().join("games");
            fs::create_dir_all(&games).unwrap();
            let cache_path = tmp.path().join("game_cache.json");
            Self {
                _tmp: tmp,
                games,
                cache_path,
            }
        }

        fn add_dir(&self, name: &str, exe: Option<(&str, usize)>) -> PathBuf {
            let dir = self.games.join(name);
            fs::create_dir_all(&dir).unwrap();
            if let Some((exe, size)) = exe {
                fs::write(dir.join(exe), vec![0u8; size]).unwrap();
            }
            dir
        }

        fn add_file(&self, name: &str) -> PathBuf {
            let path = self.games.join(name);
            fs::write(&path, b"PK").unwrap();
            path
        }

        fn library(&self) -> Library {
            self.library_with(ScanConfig::new(&self.games))
        }

        fn library_with(&self, config: ScanConfig) -> Library {
            Library::new(config, RecordCache::new(&self.cache_path))
        }

        fn cache_bytes(&self) -> Vec<u8> {
            fs::read(&self.cache_path).unwrap()
        }
    }

    fn store() -> MockStore {
        let details: AppData = serde_json::from_str(
            r#"{"genres":[{"description":"Action"}],"short_description":"Crowbars.",
                "pc_requirements":{"minimum":"Storage: 6 GB available space"}}"#,
        )
        .unwrap();
        MockStore::new()
            .with_app(70, "Half-Life")
            .with_app(220, "Half-Life 2")
            .with_rating(220, "Overwhelmingly Positive", 100)
            .with_details(220, details)
            .with_header(220)
    }

    #[tokio::test]
    async fn sync_builds_and_persists_records() {
        let fx = Fixture::new();
        let game_dir = fx.add_dir("Half.Life.2.[GOG].v1.0", Some(("hl2.exe", 300)));
        let lib = fx.library();
        let store = store();

        let report = lib.sync(&store, None).await.unwrap();

        assert_eq!(report.fetched, 1);
        assert_eq!(report.reused, 0);
        let record = &report.records[0];
        assert_eq!(record.name, "Half Life 2");
        assert_eq!(record.catalog_url, "https://store.steampowered.com/app/220");
        assert_eq!(
            record.cover_url.as_deref(),
            Some("https://cdn.test/steam/apps/220/header.jpg")
        );
        assert_eq!(record.review.label(), "Overwhelmingly Positive");
        assert_eq!(record.review.total(), 100);
        assert_eq!(record.details.genres, vec!["Action"]);
        assert_eq!(record.details.storage.as_deref(), Some("6 GB"));
        assert_eq!(record.installer_path, Some(game_dir.join("hl2.exe")));

        let persisted = RecordCache::new(&fx.cache_path).load();
        assert_eq!(persisted.get("Half Life 2"), Some(record));
    }

    #[tokio::test]
    async fn unmatched_game_gets_defaults_and_search_link() {
        let fx = Fixture::new();
        fx.add_dir("Some Indie Thing", None);
        let store = store();

        let report = fx.library().sync(&store, None).await.unwrap();
        let record = &report.records[0];

        assert_eq!(
            record.catalog_url,
            "https://www.google.com/search?q=Some+Indie+Thing+game"
        );
        assert_eq!(record.review, ReviewSummary::Unknown);
        assert_eq!(record.details, Default::default());
        assert!(record.cover_url.is_none());
        assert!(record.installer_path.is_none());
        // Only the catalog download; no per-app calls without an id.
        assert_eq!(store.calls(), vec!["app_list"]);
    }

    #[tokio::test]
    async fn archive_is_its_own_installer() {
        let fx = Fixture::new();
        let archive = fx.add_file("Portal.[RIP].ZIP");
        fx.add_file("notes.txt");
        let store = MockStore::new();
        let art = MockArt::new().with_game(3, "https://sgdb/3.png");

        let report = fx.library().sync(&store, Some(&art)).await.unwrap();

        assert_eq!(report.records.len(), 1);
        let record = &report.records[0];
        assert_eq!(record.name, "Portal");
        assert_eq!(record.installer_path, Some(archive));
        assert_eq!(record.cover_url.as_deref(), Some("https://sgdb/3.png"));
    }

    #[tokio::test]
    async fn second_pass_is_cache_only_and_byte_identical() {
        let fx = Fixture::new();
        fx.add_dir("Half Life 2", Some(("setup.exe", 10)));
        fx.add_dir("Unknown Game", None);
        fx.add_file("Half-Life.rar");
        let lib = fx.library();

        let first_store = store();
        let first = lib.sync(&first_store, None).await.unwrap();
        assert_eq!(first.fetched, 3);
        let first_bytes = fx.cache_bytes();

        let second_store = store();
        let art = MockArt::new().with_game(1, "https://sgdb/1.png");
        let second = lib.sync(&second_store, Some(&art)).await.unwrap();

        assert_eq!(second.reused, 3);
        assert_eq!(second.fetched, 0);
        assert!(second_store.calls().is_empty());
        assert!(art.calls().is_empty());
        assert_eq!(fx.cache_bytes(), first_bytes);
        assert_eq!(first.records, second.records);
    }

    #[tokio::test]
    async fn catalog_downloaded_once_per_pass() {
        let fx = Fixture::new();
        fx.add_dir("Half Life", None);
        fx.add_dir("Half Life 2", None);
        fx.add_dir("Nothing Matches", None);
        let store = store();

        fx.library().sync(&store, None).await.unwrap();

        assert_eq!(store.call_count("app_list"), 1);
        assert_eq!(store.call_count("reviews:"), 2);
    }

    #[tokio::test]
    async fn removed_folder_is_dropped_from_cache() {
        let fx = Fixture::new();
        let doomed = fx.add_dir("Half Life 2", None);
        fx.add_dir("Keeper", None);
        let lib = fx.library();

        lib.sync(&store(), None).await.unwrap();
        assert_eq!(RecordCache::new(&fx.cache_path).load().len(), 2);

        fs::remove_dir_all(doomed).unwrap();
        let report = lib.sync(&store(), None).await.unwrap();

        let persisted = RecordCache::new(&fx.cache_path).load();
        assert_eq!(persisted.len(), 1);
        assert!(persisted.contains_key("Keeper"));
        assert_eq!(report.reused, 1);
    }

    #[tokio::test]
    async fn cached_record_reused_verbatim() {
        let fx = Fixture::new();
        fx.add_dir("Half Life 2", None);

        let stale = GameRecord {
            name: "Half Life 2".into(),
            cover_url: None,
            catalog_url: "https://example.com/stale".into(),
            review: ReviewSummary::NoUserReviews,
            installer_path: Some(PathBuf::from("/moved/away.exe")),
            details: Default::default(),
        };
        let mut seeded = RecordMap::new();
        seeded.insert(stale.name.clone(), stale.clone());
        RecordCache::new(&fx.cache_path).save(&seeded).unwrap();

        let store = store();
        let report = fx.library().sync(&store, None).await.unwrap();

        assert_eq!(report.records, vec![stale]);
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn colliding_titles_collapse_to_one_record() {
        let fx = Fixture::new();
        fx.add_dir("Half Life 2", None);
        let archive = fx.add_file("Half.Life.2.[v2].zip");
        let store = store();

        let report = fx.library().sync(&store, None).await.unwrap();

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.fetched, 2);
        // Entries are processed by name; the archive sorts last and wins.
        assert_eq!(report.records[0].installer_path, Some(archive));
        assert_eq!(RecordCache::new(&fx.cache_path).load().len(), 1);
    }

    #[tokio::test]
    async fn limit_truncates_scan() {
        let fx = Fixture::new();
        fx.add_dir("A Game", None);
        fx.add_dir("B Game", None);
        fx.add_dir("C Game", None);
        let lib = fx.library_with(ScanConfig::new(&fx.games).with_limit(Some(2)));

        let report = lib.sync(&MockStore::new(), None).await.unwrap();

        let names: Vec<_> = report.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A Game", "B Game"]);
    }

    #[tokio::test]
    async fn zero_limit_scans_everything() {
        let fx = Fixture::new();
        fx.add_dir("Keeper", None);
        fx.add_dir("Other", None);
        fx.library().sync(&MockStore::new(), None).await.unwrap();

        let lib = fx.library_with(ScanConfig::new(&fx.games).with_limit(Some(0)));
        assert_eq!(lib.config().limit, None);

        let report = lib.sync(&MockStore::new(), None).await.unwrap();
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.reused, 2);

        let persisted = RecordCache::new(&fx.cache_path).load();
        assert!(persisted.contains_key("Keeper"));
        assert_eq!(persisted.len(), 2);
    }

    #[tokio::test]
    async fn missing_games_dir_is_fatal() {
        let fx = Fixture::new();
        let lib = fx.library_with(ScanConfig::new(fx.games.join("nope")));

        let err = lib.sync(&MockStore::new(), None).await.unwrap_err();
        assert!(matches!(err, LibraryError::GamesDirNotFound(_)));
        assert!(!fx.cache_path.exists());
    }

    #[tokio::test]
    async fn cache_only_mode_touches_nothing() {
        let fx = Fixture::new();
        fx.add_dir("Half Life 2", None);
        fx.library().sync(&store(), None).await.unwrap();
        let before = fx.cache_bytes();

        // Games directory gone: cache-only must not notice.
        let lib = fx.library_with(
            ScanConfig::new(fx.games.join("unplugged-drive")).with_cache_only(true),
        );
        let store = store();
        let report = lib.records(&store, None).await.unwrap();

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].name, "Half Life 2");
        assert_eq!(report.fetched, 0);
        assert!(store.calls().is_empty());
        assert_eq!(fx.cache_bytes(), before);
    }

    #[test]
    fn discover_keeps_dirs_and_archives_sorted() {
        let fx = Fixture::new();
        fx.add_file("b.rar");
        fx.add_dir("c", None);
        fx.add_dir("a", None);
        fx.add_file("d.iso");

        let items = discover_items(&ScanConfig::new(&fx.games)).unwrap();
        let names: Vec<_> = items.iter().map(|i| i.base_name()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(items[1].kind, ItemKind::Archive);
    }

    #[test]
    fn directory_names_keep_dots() {
        let item = GameItem {
            path: PathBuf::from("/games/Cool.Game.v1.2"),
            kind: ItemKind::Directory,
        };
        assert_eq!(item.base_name(), "Cool.Game.v1.2");
        assert_eq!(item.title(), "Cool Game");
    }

    #[test]
    fn catalog_urls() {
        assert_eq!(
            catalog_url("Half Life 2", Some(220)),
            "https://store.steampowered.com/app/220"
        );
        assert_eq!(
            catalog_url("Cool Game", None),
            "https://www.google.com/search?q=Cool+Game+game"
        );
    }
}
