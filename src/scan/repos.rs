//! Repository enumeration: the direct children of the input root

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::ScanError;
use crate::utils::is_hidden_name;

/// List candidate repositories under `root`, sorted by name.
///
/// Only directories count (symlinks are followed); hidden entries are
/// skipped. An unreadable root fails the whole scan, while an entry that
/// cannot be read or stat'ed is logged and skipped.
pub fn enumerate_repositories(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let entries =
        fs::read_dir(root).map_err(|source| ScanError::ReadRoot { path: root.to_path_buf(), source })?;

    let mut repos = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Failed to read entry in {}: {e}", root.display());
                continue;
            }
        };

        let path = entry.path();
        if is_hidden_name(&entry.file_name().to_string_lossy()) {
            debug!("Skipping hidden entry {}", path.display());
            continue;
        }

        match fs::metadata(&path) {
            Ok(meta) if meta.is_dir() => repos.push(path),
            Ok(_) => debug!("Skipping non-directory {}", path.display()),
            Err(e) => warn!("Failed to stat {}: {e}", path.display()),
        }
    }

    repos.sort();
    Ok(repos)
}
