//! Installer lookup inside a game folder.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

const INSTALLER_SUFFIX: &str = ".exe";

/// Returns the largest `.exe` (case-insensitive) anywhere under `dir`.
///
/// Entries that cannot be read are skipped. On equal sizes the first one
/// walked wins; walk order is filesystem-dependent. Returns `None` when `dir`
/// is not a directory or holds no executable.
pub fn find_installer(dir: &Path) -> Option<PathBuf> {
    if !dir.is_dir() {
        return None;
    }

    let mut largest: Option<(u64, PathBuf)> = None;

    for entry in WalkDir::new(dir).into_iter().filter_map(Result::ok) {
        // `Path::is_file` and `fs::metadata` follow symlinks, so linked installers count.
        if !is_installer_name(&entry.file_name().to_string_lossy()) || !entry.path().is_file() {
            continue;
        }

        let size = match std::fs::metadata(entry.path()) {
            Ok(meta) => meta.len(),
            Err(e) => {
                debug!(path = %entry.path().display(), error = %e, "skipping unreadable file");
                continue;
            }
        };

        if largest.as_ref().is_none_or(|(max, _)| size > *max) {
            largest = Some((size, entry.into_path()));
        }
    }

    let (_, path) = largest?;
    info!(
        game = %dir.display(),
        installer = %path.display(),
        "found installer"
    );
    Some(path)
}

fn is_installer_name(name: &str) -> bool {
    name.to_lowercase().ends_with(INSTALLER_SUFFIX)
}
