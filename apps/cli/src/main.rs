//! dinodir: dinosaur directory scraper and JSON API.
//!
//! Lists the directory, fetches per-dinosaur detail pages concurrently, and
//! serves the results over HTTP.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
