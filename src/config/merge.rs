//! CLI argument merging with config

use crate::domain::Config;
use std::path::PathBuf;

#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub vanity: String,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub remote: Option<String>,
    pub include_vendor: Option<bool>,
    pub include_test_only: Option<bool>,
    pub qualify_import_paths: Option<bool>,
    pub strict: Option<bool>,
}

pub fn merge_cli_with_config(mut base_config: Config, cli: CliOverrides) -> Config {
    base_config.vanity = cli.vanity;
    base_config.input_dir = cli.input_dir;
    base_config.output_dir = cli.output_dir;

    if let Some(remote) = cli.remote {
        base_config.remote = remote;
    }
    if let Some(include_vendor) = cli.include_vendor {
        base_config.include_vendor = include_vendor;
    }
    if let Some(include_test_only) = cli.include_test_only {
        base_config.include_test_only = include_test_only;
    }
    if let Some(qualify_import_paths) = cli.qualify_import_paths {
        base_config.qualify_import_paths = qualify_import_paths;
    }
    if let Some(strict) = cli.strict {
        base_config.strict = strict;
    }

    base_config
}
