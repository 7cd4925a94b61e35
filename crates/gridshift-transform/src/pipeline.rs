//! Assembly of GDAL operation plans from a resolved transformation.
//!
//! A plan is one `gdalwarp` step for raster data, one `ogr2ogr` step for
//! vector data in the direct direction, and two chained `ogr2ogr` steps for
//! vector data in the inverse direction. The chained pair streams GeoJSON
//! from the first step's stdout into the second step's stdin; the second step
//! only declares the legacy EPSG identifier on the already transformed
//! coordinates.

use gridshift_core::error::Result;
use gridshift_core::models::plan::{VSI_STDIN, VSI_STDOUT};
use gridshift_core::models::{DataKind, Direction, Engine, OperationStep, TransformationDescriptor};
use std::path::PathBuf;

use crate::formats::{raster_driver_for, VectorOutput};
use crate::precondition;

/// Interchange format streamed between chained vector steps
pub const INTERCHANGE_FORMAT: &str = "GeoJSON";

/// Layer creation option declaring the output text encoding
pub const ENCODING_OPTION: &str = "ENCODING=UTF-8";

/// Everything needed to assemble one plan
#[derive(Debug, Clone)]
pub struct PlanRequest<'a> {
    pub descriptor: &'a TransformationDescriptor,
    pub direction: Direction,
    pub data_kind: DataKind,
    /// Input datasource (path or connection string)
    pub input: String,
    /// Source layer, vector only
    pub layer: Option<String>,
    /// Requested output location, possibly a `DRIVER:path` connection string
    pub output: String,
    pub resource_exists: bool,
    pub output_exists: bool,
}

impl<'a> PlanRequest<'a> {
    /// New request; both existence flags start out false.
    pub fn new(
        descriptor: &'a TransformationDescriptor,
        direction: Direction,
        data_kind: DataKind,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            descriptor,
            direction,
            data_kind,
            input: input.into(),
            layer: None,
            output: output.into(),
            resource_exists: false,
            output_exists: false,
        }
    }

    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.layer = Some(layer.into());
        self
    }

    pub fn with_resource_exists(mut self, exists: bool) -> Self {
        self.resource_exists = exists;
        self
    }

    pub fn with_output_exists(mut self, exists: bool) -> Self {
        self.output_exists = exists;
        self
    }

    /// Location the plan writes to, with any file driver prefix removed
    pub fn output_path(&self) -> Result<PathBuf> {
        match self.data_kind {
            DataKind::Raster => Ok(PathBuf::from(&self.output)),
            DataKind::Vector => Ok(VectorOutput::parse(&self.output)?.path),
        }
    }
}

/// Check preconditions and build the ordered plan.
///
/// Fails without producing any steps if the grid is missing or a vector
/// output in a transactional format already exists.
pub fn assemble(request: &PlanRequest<'_>) -> Result<Vec<OperationStep>> {
    let vector_output = match request.data_kind {
        DataKind::Vector => Some(VectorOutput::parse(&request.output)?),
        DataKind::Raster => None,
    };

    let transactional = vector_output
        .as_ref()
        .filter(|out| out.is_transactional())
        .map(|out| out.path.as_path());

    precondition::ensure(precondition::check(
        request.descriptor,
        request.resource_exists,
        transactional,
        request.output_exists,
    ))?;

    let plan = match vector_output {
        None => vec![raster_step(request)],
        Some(out) => match request.direction {
            Direction::Direct => vec![vector_direct_step(request, &out)],
            Direction::Inverse => Vec::from(vector_inverse_steps(request, &out)),
        },
    };

    tracing::debug!(
        datum = %request.descriptor.datum(),
        grid = %request.descriptor.grid(),
        direction = %request.direction,
        kind = %request.data_kind,
        steps = plan.len(),
        "Assembled plan"
    );

    Ok(plan)
}

fn raster_step(request: &PlanRequest<'_>) -> OperationStep {
    let (source, target) = request.descriptor.crs_pair(request.direction);
    let output = PathBuf::from(&request.output);

    OperationStep::new(Engine::Gdalwarp)
        .opt("-s_srs", source)
        .opt("-t_srs", target)
        .arg("-multi")
        .opt("-of", raster_driver_for(&output))
        .arg(request.input.as_str())
        .arg(output.display().to_string())
}

fn vector_direct_step(request: &PlanRequest<'_>, out: &VectorOutput) -> OperationStep {
    let (source, target) = request.descriptor.crs_pair(Direction::Direct);

    let step = OperationStep::new(Engine::Ogr2ogr)
        .opt("-s_srs", source)
        .opt("-t_srs", target)
        .opt("-f", out.format.as_str())
        .opt("-lco", ENCODING_OPTION)
        .arg(out.path.display().to_string())
        .arg(request.input.as_str());
    with_layer(step, request.layer.as_deref())
}

fn vector_inverse_steps(request: &PlanRequest<'_>, out: &VectorOutput) -> [OperationStep; 2] {
    let (source, target) = request.descriptor.crs_pair(Direction::Inverse);

    let reproject = OperationStep::new(Engine::Ogr2ogr)
        .opt("-s_srs", source)
        .opt("-t_srs", target)
        .opt("-f", INTERCHANGE_FORMAT)
        .opt("-lco", ENCODING_OPTION)
        .arg(VSI_STDOUT)
        .arg(request.input.as_str());
    let reproject = with_layer(reproject, request.layer.as_deref());

    let declare = OperationStep::new(Engine::Ogr2ogr)
        .opt("-f", out.format.as_str())
        .opt("-a_srs", request.descriptor.legacy_crs_identifier())
        .opt("-lco", ENCODING_OPTION)
        .arg(out.path.display().to_string())
        .arg(VSI_STDIN);

    [reproject, declare]
}

fn with_layer(step: OperationStep, layer: Option<&str>) -> OperationStep {
    match layer {
        Some(name) => step.arg(name),
        None => step,
    }
}
