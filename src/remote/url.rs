//! Remote URL normalization
//!
//! Two independent string transforms: rewriting an SSH remote into its HTTPS
//! clone URL, and stripping the `.git` suffix to get the forge's web page.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Suffix git forges put on clone URLs
pub const GIT_SUFFIX: &str = ".git";

/// `git@host:owner/repo[.git]`
static SSH_REMOTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^git@(?P<host>[A-Za-z0-9.\-]+):(?P<path>[A-Za-z0-9._\-]+(?:/[A-Za-z0-9._\-]+)+)$")
        .expect("valid SSH remote regex")
});

/// `https://host/owner/repo[.git]`
static HTTPS_REMOTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://[A-Za-z0-9.\-]+(?::[0-9]+)?(?:/[A-Za-z0-9._\-]+){2,}$")
        .expect("valid HTTPS remote regex")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteUrlError {
    #[error("not a supported git remote URL {0:?} (expected git@host:owner/repo.git or https://host/owner/repo)")]
    Unsupported(String),

    #[error("not an HTTPS repository URL {0:?}")]
    NotHttps(String),
}

/// Rewrite an SSH remote into its HTTPS clone URL.
///
/// HTTPS remotes come back unchanged, suffix included.
pub fn normalize_remote_url(url: &str) -> Result<String, RemoteUrlError> {
    if let Some(caps) = SSH_REMOTE.captures(url) {
        let path = &caps["path"];
        let path = path.strip_suffix(GIT_SUFFIX).unwrap_or(path);
        if path.ends_with('/') || has_dot_segment(path) {
            return Err(RemoteUrlError::Unsupported(url.to_string()));
        }
        return Ok(format!("https://{}/{}{}", &caps["host"], path, GIT_SUFFIX));
    }

    if is_https_remote(url) {
        return Ok(url.to_string());
    }

    Err(RemoteUrlError::Unsupported(url.to_string()))
}

/// Web page of an HTTPS repository URL: the URL minus one trailing `.git`.
pub fn site_url(url: &str) -> Result<String, RemoteUrlError> {
    if !is_https_remote(url) {
        return Err(RemoteUrlError::NotHttps(url.to_string()));
    }
    Ok(url.strip_suffix(GIT_SUFFIX).unwrap_or(url).to_string())
}

pub fn is_https_remote(url: &str) -> bool {
    HTTPS_REMOTE.is_match(url)
        && url
            .strip_prefix("https://")
            .and_then(|rest| rest.split_once('/'))
            .is_some_and(|(_, path)| !has_dot_segment(path))
}

/// `.` and `..` are never owner or repository names.
fn has_dot_segment(path: &str) -> bool {
    path.split('/').any(|segment| !segment.is_empty() && segment.chars().all(|c| c == '.'))
}
