//! Reading a repository's remote from its git metadata

use git2::{ConfigLevel, Repository};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use super::url::{normalize_remote_url, site_url, RemoteUrlError};
use crate::domain::RepositoryRecord;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("failed to open repository {}", .0.display())]
    Open(PathBuf, #[source] git2::Error),

    #[error("repository {} has no remote {remote:?}", .path.display())]
    MissingRemote { path: PathBuf, remote: String },

    #[error("failed to read config of {}", .0.display())]
    Config(PathBuf, #[source] git2::Error),

    #[error("remote {remote:?} of {} has no URL", .path.display())]
    NoUrl { path: PathBuf, remote: String },

    #[error("expected exactly one URL for remote {remote:?} of {}, found {urls:?}", .path.display())]
    AmbiguousUrl { path: PathBuf, remote: String, urls: Vec<String> },

    #[error("remote {remote:?} of {} has an unusable URL", .path.display())]
    Url {
        path: PathBuf,
        remote: String,
        #[source]
        source: RemoteUrlError,
    },
}

/// Every URL configured for `remote` in the repository's own config.
pub fn remote_urls(repo_path: &Path, remote: &str) -> Result<Vec<String>, ResolveError> {
    let repo =
        Repository::open(repo_path).map_err(|e| ResolveError::Open(repo_path.to_path_buf(), e))?;

    let config_err = |e| ResolveError::Config(repo_path.to_path_buf(), e);

    let names = repo.remotes().map_err(config_err)?;
    if !names.iter().flatten().any(|name| name == remote) {
        return Err(ResolveError::MissingRemote {
            path: repo_path.to_path_buf(),
            remote: remote.to_string(),
        });
    }

    let config = repo.config().map_err(config_err)?;
    let local = config.open_level(ConfigLevel::Local).map_err(config_err)?;

    let key = format!("remote.{remote}.url");
    let mut urls = Vec::new();
    let mut entries = local.multivar(&key, None).map_err(config_err)?;
    while let Some(entry) = entries.next() {
        let entry = entry.map_err(config_err)?;
        if let Some(value) = entry.value() {
            urls.push(value.to_string());
        }
    }

    debug!("{} {key} = {urls:?}", repo_path.display());
    Ok(urls)
}

/// Resolve the repository at `repo_path` into a record with normalized URLs.
pub fn resolve_repository(
    repo_path: &Path,
    import_name: &str,
    remote: &str,
) -> Result<RepositoryRecord, ResolveError> {
    let mut urls = remote_urls(repo_path, remote)?;
    let url = match urls.len() {
        0 => {
            return Err(ResolveError::NoUrl {
                path: repo_path.to_path_buf(),
                remote: remote.to_string(),
            })
        }
        1 => urls.remove(0),
        _ => {
            return Err(ResolveError::AmbiguousUrl {
                path: repo_path.to_path_buf(),
                remote: remote.to_string(),
                urls,
            })
        }
    };

    let url_err = |source| ResolveError::Url {
        path: repo_path.to_path_buf(),
        remote: remote.to_string(),
        source,
    };
    let canonical_remote_url = normalize_remote_url(&url).map_err(url_err)?;
    let web_url = site_url(&canonical_remote_url).map_err(url_err)?;

    Ok(RepositoryRecord {
        local_path: repo_path.to_path_buf(),
        import_name: import_name.to_string(),
        canonical_remote_url,
        web_url,
    })
}
