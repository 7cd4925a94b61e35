//! Command implementations

mod config;
mod doctor;
mod list;
mod transform;

use crate::cli::{Cli, Commands};
use crate::config_loader;
use crate::output::OutputWriter;
use anyhow::Result;
use gridshift_core::config::CliConfigOverrides;
use gridshift_core::models::DataKind;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config = config_loader::load_config(
        cli.config.as_deref(),
        CliConfigOverrides { grid_dir: cli.grid_dir },
    )?;

    match cli.command {
        Commands::Raster(args) => {
            transform::execute(args, None, DataKind::Raster, &config, &output, cli.dry_run).await
        }
        Commands::Vector(args) => {
            transform::execute(
                args.transform,
                args.layer,
                DataKind::Vector,
                &config,
                &output,
                cli.dry_run,
            )
            .await
        }
        Commands::List => list::execute(&output),
        Commands::Doctor(args) => doctor::execute(args, &config, &output),
        Commands::Config => config::execute(&config, &output),
    }
}
