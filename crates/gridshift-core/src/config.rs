use crate::error::{GridshiftError, Result};
use crate::models::Engine;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "gridshift.toml";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for gridshift
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub grid_dir: ConfigValue<PathBuf>,
    pub gdalwarp: ConfigValue<String>,
    pub ogr2ogr: ConfigValue<String>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            grid_dir: ConfigValue::new(PathBuf::from("grids"), ConfigSource::Default),
            gdalwarp: ConfigValue::new(
                Engine::Gdalwarp.program().to_string(),
                ConfigSource::Default,
            ),
            ogr2ogr: ConfigValue::new(Engine::Ogr2ogr.program().to_string(), ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| GridshiftError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| GridshiftError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(grid_dir) = file_config.grid_dir {
            // Relative grid directories are taken relative to the config file
            let grid_dir = match path.as_ref().parent() {
                Some(parent) if grid_dir.is_relative() => parent.join(grid_dir),
                _ => grid_dir,
            };
            self.grid_dir.update(grid_dir, ConfigSource::File);
        }

        if let Some(engines) = file_config.engines {
            if let Some(gdalwarp) = engines.gdalwarp {
                self.gdalwarp.update(gdalwarp, ConfigSource::File);
            }
            if let Some(ogr2ogr) = engines.ogr2ogr {
                self.ogr2ogr.update(ogr2ogr, ConfigSource::File);
            }
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // GRIDSHIFT_GRID_DIR
        if let Ok(dir) = env::var("GRIDSHIFT_GRID_DIR") {
            if dir.trim().is_empty() {
                tracing::warn!("Ignoring empty GRIDSHIFT_GRID_DIR");
            } else {
                self.grid_dir.update(PathBuf::from(dir), ConfigSource::Environment);
            }
        }

        // GRIDSHIFT_GDALWARP
        if let Ok(program) = env::var("GRIDSHIFT_GDALWARP") {
            match validate_program("gdalwarp", &program) {
                Ok(()) => self.gdalwarp.update(program, ConfigSource::Environment),
                Err(_) => tracing::warn!("Invalid GRIDSHIFT_GDALWARP value '{}'", program),
            }
        }

        // GRIDSHIFT_OGR2OGR
        if let Ok(program) = env::var("GRIDSHIFT_OGR2OGR") {
            match validate_program("ogr2ogr", &program) {
                Ok(()) => self.ogr2ogr.update(program, ConfigSource::Environment),
                Err(_) => tracing::warn!("Invalid GRIDSHIFT_OGR2OGR value '{}'", program),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(grid_dir) = overrides.grid_dir {
            self.grid_dir.update(grid_dir, ConfigSource::Cli);
        }
    }

    /// Program to launch for an engine
    pub fn program_for(&self, engine: Engine) -> &str {
        match engine {
            Engine::Gdalwarp => &self.gdalwarp.value,
            Engine::Ogr2ogr => &self.ogr2ogr.value,
        }
    }

    /// Grid directory as an absolute path.
    ///
    /// Relative directories are anchored at the current working directory.
    pub fn absolute_grid_dir(&self) -> Result<PathBuf> {
        let dir = &self.grid_dir.value;
        if dir.is_absolute() {
            return Ok(dir.clone());
        }
        Ok(env::current_dir()?.join(dir))
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "grid_dir".to_string(),
            (self.grid_dir.value.display().to_string(), self.grid_dir.source),
        );
        map.insert("gdalwarp".to_string(), (self.gdalwarp.value.clone(), self.gdalwarp.source));
        map.insert("ogr2ogr".to_string(), (self.ogr2ogr.value.clone(), self.ogr2ogr.source));

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    grid_dir: Option<PathBuf>,
    engines: Option<EngineConfig>,
}

#[derive(Debug, Deserialize, Serialize)]
struct EngineConfig {
    gdalwarp: Option<String>,
    ogr2ogr: Option<String>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub grid_dir: Option<PathBuf>,
}

fn validate_program(key: &str, program: &str) -> Result<()> {
    if program.trim().is_empty() {
        return Err(GridshiftError::ConfigInvalid {
            key: key.to_string(),
            reason: "Program name must not be empty".to_string(),
        });
    }
    Ok(())
}
