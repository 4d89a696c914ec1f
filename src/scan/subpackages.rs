//! Sub-package discovery inside one repository
//!
//! A directory is a package when it directly contains a Go source file. The
//! walk skips directories the go tool ignores (`.`/`_` prefixed, `testdata`)
//! and, unless asked otherwise, every directory beneath a `vendor` directory.
//! Sources directly in `vendor` still make it a package.

use std::path::Path;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use super::ScanError;
use crate::domain::SubpackageSet;
use crate::utils::is_hidden_name;

/// Extension of the sources that make a directory importable
pub const SOURCE_EXTENSION: &str = "go";

const TEST_SUFFIX: &str = "_test.go";
const VENDOR_DIR: &str = "vendor";
const TESTDATA_DIR: &str = "testdata";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscoverOptions {
    /// Descend into the subdirectories of `vendor` directories
    pub include_vendor: bool,

    /// Let `_test.go` files qualify a directory
    pub include_test_only: bool,
}

/// Walk `repo_root` depth-first and collect every package directory,
/// relative to the root. The root itself is always in the returned set.
pub fn discover_subpackages(
    repo_root: &Path,
    options: DiscoverOptions,
) -> Result<SubpackageSet, ScanError> {
    let mut found = SubpackageSet::new();

    let walker = WalkDir::new(repo_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e, options));

    for entry in walker {
        let entry = entry.map_err(|source| ScanError::Walk { root: repo_root.to_path_buf(), source })?;
        if !entry.file_type().is_file() || !is_package_source(entry.file_name(), options) {
            continue;
        }

        let Some(dir) = entry.path().parent() else {
            continue;
        };
        let rel = dir.strip_prefix(repo_root).unwrap_or(dir);
        if found.insert(rel) {
            debug!("Package {} in {}", rel.display(), repo_root.display());
        }
    }

    Ok(found)
}

fn is_skipped_dir(entry: &DirEntry, options: DiscoverOptions) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    is_hidden_name(&name)
        || name.starts_with('_')
        || name == TESTDATA_DIR
        || (!options.include_vendor && is_beneath_vendor(entry))
}

/// The entry's parent is a `vendor` directory inside the repository.
fn is_beneath_vendor(entry: &DirEntry) -> bool {
    entry.depth() >= 2
        && entry
            .path()
            .parent()
            .and_then(Path::file_name)
            .is_some_and(|parent| parent == VENDOR_DIR)
}

fn is_package_source(file_name: &std::ffi::OsStr, options: DiscoverOptions) -> bool {
    let name = file_name.to_string_lossy();
    if is_hidden_name(&name) || name.starts_with('_') {
        return false;
    }
    let Some((_, ext)) = name.rsplit_once('.') else {
        return false;
    };
    ext == SOURCE_EXTENSION && (options.include_test_only || !name.ends_with(TEST_SUFFIX))
}
