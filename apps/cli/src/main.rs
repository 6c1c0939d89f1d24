//! webchunker CLI: split a web page into heading-anchored content chunks.
//!
//! Fetches a URL (or reads a saved HTML file), segments it by headings and
//! prints the resulting sections as JSON on stdout.

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
