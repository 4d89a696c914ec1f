//! Conversions between filesystem paths and `/`-separated import paths

use std::path::{Component, Path};

/// Render a relative filesystem path as an import path (`a/b/c`).
///
/// Only normal components are kept, so `./a/../b` style inputs never leak
/// `.` or `..` into an import path.
pub fn to_import_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Join `child` onto `parent`, treating an empty side as absent.
pub fn join_import_path(parent: &str, child: &str) -> String {
    match (parent.is_empty(), child.is_empty()) {
        (true, _) => child.to_string(),
        (_, true) => parent.to_string(),
        _ => format!("{}/{}", parent.trim_end_matches('/'), child.trim_start_matches('/')),
    }
}

pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.')
}
