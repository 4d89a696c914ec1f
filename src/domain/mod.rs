//! Core domain types and models
//!
//! Defines the generator configuration, the per-repository record, the
//! per-page rendering context and the bookkeeping used during a run.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Remote read when none is configured
pub const DEFAULT_REMOTE: &str = "origin";

/// Version control system named in the `go-import` marker
pub const VCS: &str = "git";

/// Generator configuration after defaults, config file and CLI are merged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The vanity domain, e.g. `example.com`
    #[serde(skip)]
    pub vanity: String,

    /// Directory whose children are the repositories
    #[serde(skip)]
    pub input_dir: PathBuf,

    /// Directory the redirect pages are written to
    #[serde(skip)]
    pub output_dir: PathBuf,

    /// Name of the git remote to read
    pub remote: String,

    /// Emit pages for packages beneath `vendor/` directories
    pub include_vendor: bool,

    /// Let `_test.go` files qualify a directory as a package
    pub include_test_only: bool,

    /// Prefix the vanity domain to the name in the `go-import` marker
    pub qualify_import_paths: bool,

    /// Fail the run when any repository or page failed
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vanity: String::new(),
            input_dir: PathBuf::new(),
            output_dir: PathBuf::new(),
            remote: DEFAULT_REMOTE.to_string(),
            include_vendor: false,
            include_test_only: false,
            qualify_import_paths: false,
            strict: false,
        }
    }
}

/// A repository whose remote has been resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRecord {
    /// Working copy on disk
    pub local_path: PathBuf,

    /// Path relative to the input root, `/`-separated
    pub import_name: String,

    /// Normalized HTTPS clone URL, e.g. `https://github.com/user/proj.git`
    pub canonical_remote_url: String,

    /// Human-facing page, e.g. `https://github.com/user/proj`
    pub web_url: String,
}

impl RepositoryRecord {
    /// Build the page context shared by the root and every sub-package.
    ///
    /// `marker_name` is what goes into the `go-import` marker; it is either
    /// the bare import name or the import name qualified with the vanity domain.
    pub fn page_data(&self, marker_name: impl Into<String>) -> PageData {
        PageData {
            import_name: marker_name.into(),
            repo_url: self.canonical_remote_url.clone(),
            site_url: self.web_url.clone(),
        }
    }
}

/// Rendering context for one redirect page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageData {
    /// Import prefix announced in the `go-import` marker
    pub import_name: String,

    /// Clone URL announced in the `go-import` marker
    pub repo_url: String,

    /// Target of every redirect on the page
    pub site_url: String,
}

/// Relative directories of one repository that already have a page.
///
/// The repository root (the empty path) is always a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubpackageSet {
    dirs: BTreeSet<PathBuf>,
}

impl Default for SubpackageSet {
    fn default() -> Self {
        Self::new()
    }
}

impl SubpackageSet {
    pub fn new() -> Self {
        Self { dirs: BTreeSet::from([PathBuf::new()]) }
    }

    /// Record `dir`, returning `true` if it was not yet present.
    pub fn insert(&mut self, dir: impl Into<PathBuf>) -> bool {
        self.dirs.insert(dir.into())
    }

    pub fn contains(&self, dir: &Path) -> bool {
        self.dirs.contains(dir)
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Sub-package directories in sorted order, excluding the root
    pub fn subpackages(&self) -> impl Iterator<Item = &Path> {
        self.dirs.iter().map(PathBuf::as_path).filter(|d| !d.as_os_str().is_empty())
    }
}

/// Outcome counters for one generator run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateSummary {
    pub repositories_seen: usize,
    pub repositories_failed: usize,
    pub pages_written: usize,
    pub pages_failed: usize,
}

impl GenerateSummary {
    pub fn failures(&self) -> usize {
        self.repositories_failed + self.pages_failed
    }

    pub fn is_clean(&self) -> bool {
        self.failures() == 0
    }
}
