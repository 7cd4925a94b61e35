use async_trait::async_trait;
use std::path::Path;

use crate::error::Result;
use crate::models::OperationStep;

/// Port for executing an assembled plan with the external GDAL engines
#[async_trait]
pub trait PlanRunner: Send + Sync {
    /// Run every step of `plan` as one unit.
    ///
    /// On failure nothing is left at `output`; a plan either fully
    /// completes or the error is returned.
    async fn run(&self, plan: &[OperationStep], output: &Path) -> Result<()>;
}
