//! Command-line interface for vanity-redirects

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{load_config, merge_cli_with_config, validate, CliOverrides};
use crate::generate::Generator;

/// Exit code for usage errors
const USAGE_EXIT_CODE: i32 = 1;

/// Generate static HTML pages that redirect Go vanity import paths to their
/// real repositories
#[derive(Parser, Debug)]
#[command(name = "vanity-redirects")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Vanity domain the packages are imported from (e.g. example.com)
    #[arg(value_name = "VANITY")]
    pub vanity: String,

    /// Directory whose subdirectories are git working copies
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Directory the redirect pages are written to
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Git remote to read the repository URL from [default: origin]
    #[arg(long, value_name = "NAME")]
    pub remote: Option<String>,

    /// Also emit pages for packages beneath vendor/ directories
    #[arg(long, overrides_with = "no_include_vendor")]
    pub include_vendor: bool,

    /// Skip packages beneath vendor/ directories, overriding the config file
    #[arg(long, overrides_with = "include_vendor")]
    pub no_include_vendor: bool,

    /// Let directories holding only _test.go files get a page
    #[arg(long, overrides_with = "no_include_test_only")]
    pub include_test_only: bool,

    /// Skip directories holding only _test.go files, overriding the config file
    #[arg(long, overrides_with = "include_test_only")]
    pub no_include_test_only: bool,

    /// Prefix the vanity domain to the import name in the go-import marker
    #[arg(long, overrides_with = "no_qualify_import_paths")]
    pub qualify_import_paths: bool,

    /// Use the bare import name in the go-import marker, overriding the config file
    #[arg(long, overrides_with = "qualify_import_paths")]
    pub no_qualify_import_paths: bool,

    /// Exit with an error when any repository or page failed
    #[arg(long, overrides_with = "no_strict")]
    pub strict: bool,

    /// Exit successfully after a best-effort run, overriding the config file
    #[arg(long, overrides_with = "strict")]
    pub no_strict: bool,

    /// Path to config file (default: vanity-redirects.toml in the current directory)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            vanity: self.vanity.clone(),
            input_dir: self.input_dir.clone(),
            output_dir: self.output_dir.clone(),
            remote: self.remote.clone(),
            include_vendor: toggle(self.include_vendor, self.no_include_vendor),
            include_test_only: toggle(self.include_test_only, self.no_include_test_only),
            qualify_import_paths: toggle(self.qualify_import_paths, self.no_qualify_import_paths),
            strict: toggle(self.strict, self.no_strict),
        }
    }
}

/// `--flag` / `--no-flag` pair; `None` leaves the config file value alone.
fn toggle(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

pub fn run() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version land here too and are not failures
            let code = if err.use_stderr() { USAGE_EXIT_CODE } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    // A non-empty RUST_LOG replaces the default level; --verbose lowers the default to DEBUG.
    let default_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let cwd = std::env::current_dir()?;
    let file_config = load_config(&cwd, cli.config.as_deref())?;
    let config = merge_cli_with_config(file_config, cli.overrides());
    validate(&config)?;

    let generator = Generator::new(config);
    let summary = generator.run().with_context(|| {
        format!("failed to generate pages from {}", generator.config().input_dir.display())
    })?;

    if generator.config().strict && !summary.is_clean() {
        anyhow::bail!(
            "{} repositories and {} pages failed",
            summary.repositories_failed,
            summary.pages_failed
        );
    }

    Ok(())
}
