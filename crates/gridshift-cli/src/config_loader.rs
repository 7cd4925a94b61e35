//! Configuration loading utilities for CLI commands

use anyhow::{bail, Context, Result};
use gridshift_core::config::{CliConfigOverrides, LayeredConfig, CONFIG_FILE_NAME};
use std::path::{Path, PathBuf};

/// Load layered configuration: defaults, then the config file, then the
/// environment, then CLI overrides.
///
/// An explicit `--config` path must exist; otherwise `gridshift.toml` in the
/// working directory is used when present.
pub fn load_config(
    config_path: Option<&Path>,
    overrides: CliConfigOverrides,
) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();

    match config_path {
        Some(path) => {
            if !path.is_file() {
                bail!("Config file not found: {}", path.display());
            }
            config = config
                .load_from_file(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
        }
        None => {
            let default_path = PathBuf::from(CONFIG_FILE_NAME);
            if default_path.is_file() {
                tracing::debug!("Using {}", default_path.display());
                config = config
                    .load_from_file(&default_path)
                    .context("Failed to load configuration file")?;
            }
        }
    }

    let mut config = config.load_from_env();
    config.update_from_cli(overrides);
    Ok(config)
}
