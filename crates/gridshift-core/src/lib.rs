//! gridshift Core - Domain models, errors, and configuration
//!
//! This crate contains the datum/grid identifiers, the transformation descriptor,
//! the operation plan types and the port through which plans reach GDAL.

pub mod config;
pub mod error;
pub mod models;
pub mod ports;

pub use error::{GridshiftError, Result};
