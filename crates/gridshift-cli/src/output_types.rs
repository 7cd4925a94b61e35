use gridshift_core::config::ConfigSource;
use gridshift_core::models::{
    DataKind, DatumId, Direction, GridId, OperationStep, TransformationDescriptor,
};
use serde::Serialize;
use std::path::PathBuf;

/// Output for raster and vector commands
#[derive(Debug, Serialize)]
pub struct TransformOutput {
    pub kind: DataKind,
    pub direction: Direction,
    pub descriptor: TransformationDescriptor,
    pub output: PathBuf,
    pub steps: Vec<OperationStep>,
    pub executed: bool,
}

/// One row of the list command
#[derive(Debug, Serialize)]
pub struct RegistryEntryInfo {
    pub datum: DatumId,
    pub datum_label: &'static str,
    pub legacy_crs: String,
    pub grid: GridId,
    pub grid_label: &'static str,
    pub grid_file: &'static str,
}

/// Output for the list command
#[derive(Debug, Serialize)]
pub struct ListOutput {
    pub target_crs: &'static str,
    pub transformations: Vec<RegistryEntryInfo>,
}

/// Grid availability as reported by doctor
#[derive(Debug, Serialize)]
pub struct GridCheck {
    pub grid: GridId,
    pub path: PathBuf,
    pub present: bool,
    pub guidance: Option<String>,
}

/// Engine availability as reported by doctor
#[derive(Debug, Serialize)]
pub struct EngineCheck {
    pub engine: String,
    pub program: String,
    pub version: Option<String>,
}

/// Output for the doctor command
#[derive(Debug, Serialize)]
pub struct DoctorOutput {
    pub grid_dir: PathBuf,
    pub grids: Vec<GridCheck>,
    pub engines: Vec<EngineCheck>,
    pub healthy: bool,
}

/// Output for the config command
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub values: Vec<ConfigEntry>,
}

#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
    pub source: ConfigSource,
}
