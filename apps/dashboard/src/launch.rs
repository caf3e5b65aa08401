//! Installer launch for a cached game.

use std::path::Path;

use gameshelf_library::RecordCache;
use serde::Serialize;
use tracing::{info, warn};

/// Result of a launch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    Launched { file_name: String },
    /// Unknown game, or a record without an installer.
    NotFound,
    Failed { message: String },
}

/// JSON body returned by the install endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchResponse {
    pub status: &'static str,
    pub message: String,
}

impl LaunchOutcome {
    pub fn response(&self) -> LaunchResponse {
        match self {
            Self::Launched { file_name } => LaunchResponse {
                status: "success",
                message: format!("Launched {file_name}"),
            },
            Self::NotFound => LaunchResponse {
                status: "error",
                message: "Game or installer path not found.".into(),
            },
            Self::Failed { message } => LaunchResponse {
                status: "error",
                message: message.clone(),
            },
        }
    }
}

/// Looks `name` up in the persisted cache and hands its installer to `opener`.
///
/// A recorded path that no longer exists is a launch failure, not a missing game.
pub fn launch_by_name(
    cache: &RecordCache,
    name: &str,
    opener: impl FnOnce(&Path) -> std::io::Result<()>,
) -> LaunchOutcome {
    let Some(path) = cache.get(name).and_then(|r| r.installer_path) else {
        warn!(name, "no installer recorded");
        return LaunchOutcome::NotFound;
    };

    if !path.exists() {
        warn!(name, path = %path.display(), "installer no longer exists");
        return LaunchOutcome::Failed {
            message: format!("Installer not found at {}", path.display()),
        };
    }

    info!(name, path = %path.display(), "launching installer");
    match opener(&path) {
        Ok(()) => LaunchOutcome::Launched {
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        },
        Err(e) => {
            warn!(name, path = %path.display(), error = %e, "failed to launch installer");
            LaunchOutcome::Failed {
                message: e.to_string(),
            }
        }
    }
}

/// Opens a file with the host's default handler.
pub fn open_with_system(path: &Path) -> std::io::Result<()> {
    open::that(path)
}
