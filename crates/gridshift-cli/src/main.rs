//! gridshift CLI - Command-line interface
//!
//! Resolves the transformation, checks the grid and output, and hands the
//! assembled plan to gdalwarp / ogr2ogr.

mod cli;
mod commands;
mod config_loader;
mod dry_run;
mod errors;
mod output;
mod output_types;
mod runner;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use errors::CliError;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Create async runtime
    let runtime = tokio::runtime::Runtime::new()?;

    // Execute the command
    if let Err(err) = runtime.block_on(async { commands::execute(cli).await }) {
        if let Some(cli_err) = err.downcast_ref::<CliError>() {
            cli_err.display();
            std::process::exit(1);
        }
        return Err(err);
    }

    Ok(())
}
