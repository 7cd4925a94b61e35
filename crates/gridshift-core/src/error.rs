//! Error types for gridshift

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridshiftError {
    // Resolution errors
    #[error("Transformation not supported: datum {datum} cannot be combined with grid {grid}")]
    TransformationNotFound { datum: String, grid: String },

    // Precondition errors
    #[error("Grid file {resource} not found.\n{guidance}")]
    ResourceMissing { resource: String, guidance: String },

    #[error("Output file \"{}\" already exists", path.display())]
    OutputAlreadyExists { path: PathBuf },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // Execution errors
    #[error("{engine} failed: {reason}")]
    EngineFailed { engine: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GridshiftError>;
