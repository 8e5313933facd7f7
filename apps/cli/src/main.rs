//! InterwikiExtracts CLI — fetch rendered excerpts from remote wikis.
//!
//! A host driver around the retrieval pipeline: one extract per
//! invocation, printed to stdout.

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
