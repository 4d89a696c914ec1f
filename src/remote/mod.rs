//! Remote resolution: from a working copy to its canonical forge URLs

pub mod resolve;
pub mod url;

pub use resolve::{remote_urls, resolve_repository, ResolveError};
pub use url::{normalize_remote_url, site_url, RemoteUrlError};
