//! Utility functions

pub mod paths;

pub use paths::{is_hidden_name, join_import_path, to_import_path};
