//! Vanity-Redirects: static redirect pages for Go packages on a vanity domain
//!
//! Walks a directory of git working copies, resolves each repository's remote
//! to its forge URL, and writes one `index.html` per importable package that
//! carries the `go-import` marker and redirects browsers to the forge.

pub mod cli;
pub mod config;
pub mod domain;
pub mod generate;
pub mod remote;
pub mod render;
pub mod scan;
pub mod utils;
