//! Filesystem scanning: repositories under the input root, packages inside
//! each repository

pub mod repos;
pub mod subpackages;

use std::path::PathBuf;
use thiserror::Error;

pub use repos::enumerate_repositories;
pub use subpackages::{discover_subpackages, DiscoverOptions};

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to read repos in {}", .path.display())]
    ReadRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk for subpackages in {}", .root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}
