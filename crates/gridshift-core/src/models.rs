pub mod identifiers;
pub mod plan;
pub mod transformation;

pub use identifiers::{DatumId, GridId};
pub use plan::{Engine, OperationStep, Precondition};
pub use transformation::{
    DataKind, Direction, TransformationDescriptor, MODERN_CRS, MODERN_CRS_NAME,
};
