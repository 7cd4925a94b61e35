//! gridshift Transform - Transformation registry and plan assembly
//!
//! This crate resolves (datum, grid) pairs into transformation descriptors and
//! turns them into ordered GDAL operation plans for raster and vector data.

pub mod formats;
pub mod pipeline;
pub mod precondition;
pub mod registry;

pub use pipeline::{assemble, PlanRequest};
pub use registry::resolve;
