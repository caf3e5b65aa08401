//! Dashboard configuration.
//!
//! Reads/writes TOML at `~/.config/gameshelf/config.toml`
//! (`%APPDATA%\gameshelf\config.toml` on Windows). Values are layered:
//! file, then environment, then command-line flags.

use std::path::{Path, PathBuf};

use gameshelf_library::ScanConfig;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

pub const GAMES_DIR_ENV: &str = "GAMES_DIR";
pub const API_KEY_ENV: &str = "STEAMGRIDDB_API_KEY";

/// Dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_games_dir")]
    pub games_dir: PathBuf,
    /// Empty disables the SteamGridDB cover fallback.
    #[serde(default)]
    pub steamgriddb_api_key: String,
    #[serde(default = "default_cache_file")]
    pub cache_file: PathBuf,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_open_browser")]
    pub open_browser: bool,
    /// Only the first N entries are processed. Command line only.
    #[serde(skip)]
    pub limit: Option<usize>,
    /// Serve the cache without scanning. Command line only.
    #[serde(skip)]
    pub cache_only: bool,
}

fn default_games_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        PathBuf::from("G:\\Games")
    }

    #[cfg(not(target_os = "windows"))]
    {
        PathBuf::from("~/Games")
    }
}

fn default_cache_file() -> PathBuf {
    PathBuf::from("game_cache.json")
}

fn default_port() -> u16 {
    5000
}

fn default_open_browser() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            games_dir: default_games_dir(),
            steamgriddb_api_key: String::new(),
            cache_file: default_cache_file(),
            port: default_port(),
            open_browser: default_open_browser(),
            limit: None,
            cache_only: false,
        }
    }
}

impl Config {
    /// Loads the configuration file, writing the defaults out if it is missing.
    ///
    /// `path` overrides the per-user location.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let file_path = match path {
            Some(p) => p.to_path_buf(),
            None => config_file_path(),
        };

        if !file_path.exists() {
            let config = Self::default();
            match config.save(&file_path) {
                Ok(()) => tracing::info!(path = %file_path.display(), "wrote default configuration"),
                Err(e) => tracing::warn!(
                    path = %file_path.display(),
                    error = %e,
                    "could not write default configuration"
                ),
            }
            return Ok(config);
        }

        let content = std::fs::read_to_string(&file_path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid config {}: {e}", file_path.display()))?;

        tracing::debug!(path = %file_path.display(), "configuration loaded");
        Ok(config)
    }

    /// Saves the file-backed fields as TOML.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        // The file may hold an API key.
        set_permissions_0600(path);
        Ok(())
    }

    /// Applies `GAMES_DIR` and `STEAMGRIDDB_API_KEY`. Empty values are ignored.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup(GAMES_DIR_ENV).filter(|v| !v.is_empty()) {
            self.games_dir = PathBuf::from(dir);
        }
        if let Some(key) = lookup(API_KEY_ENV).filter(|v| !v.is_empty()) {
            self.steamgriddb_api_key = key;
        }
        self
    }

    /// Applies command-line flags, which take precedence over everything else.
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(dir) = &cli.games_dir {
            self.games_dir = dir.clone();
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if cli.no_browser {
            self.open_browser = false;
        }
        self.limit = cli.limit;
        self.cache_only = cli.cache_only;
        self
    }

    pub fn api_key(&self) -> Option<&str> {
        let key = self.steamgriddb_api_key.trim();
        (!key.is_empty()).then_some(key)
    }

    /// Freezes the scan-related values for the library.
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig::new(expand_home(&self.games_dir))
            .with_limit(self.limit)
            .with_cache_only(self.cache_only)
    }
}

/// Expands a leading `~` to the user's home directory.
fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

fn home_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    let var = "USERPROFILE";
    #[cfg(not(target_os = "windows"))]
    let var = "HOME";

    std::env::var_os(var).map(PathBuf::from)
}

fn set_permissions_0600(path: &Path) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600));
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
}

fn config_file_path() -> PathBuf {
    config_base_dir().join("gameshelf").join("config.toml")
}

fn config_base_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        PathBuf::from(appdata)
    }

    #[cfg(not(target_os = "windows"))]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        PathBuf::from(home).join(".config")
    }
}
