//! vanity-redirects: Generate static redirect pages for Go vanity imports
//!
//! Every package found in the repositories under the input directory gets an
//! `index.html` that points the go tool and browsers at the real repository.

use anyhow::Result;

mod cli;
mod config;
mod domain;
mod generate;
mod remote;
mod render;
mod scan;
mod utils;

fn main() -> Result<()> {
    cli::run()
}
