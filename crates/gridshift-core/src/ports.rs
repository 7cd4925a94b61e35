//! Port trait definitions
//!
//! These traits define the interfaces that adapters must implement.

pub mod engine;

pub use engine::PlanRunner;
