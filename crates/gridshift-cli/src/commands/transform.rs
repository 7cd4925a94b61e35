//! Raster and vector transformation commands

use crate::cli::TransformArgs;
use crate::dry_run::display_planned_actions;
use crate::errors;
use crate::output::OutputWriter;
use crate::output_types::TransformOutput;
use crate::runner::ProcessRunner;
use anyhow::Result;
use gridshift_core::config::LayeredConfig;
use gridshift_core::models::{DataKind, Direction};
use gridshift_core::ports::PlanRunner;
use gridshift_transform::{assemble, resolve, PlanRequest};
use std::path::Path;

pub async fn execute(
    args: TransformArgs,
    layer: Option<String>,
    kind: DataKind,
    config: &LayeredConfig,
    output: &OutputWriter,
    dry_run: bool,
) -> Result<()> {
    let grid_dir = config.absolute_grid_dir()?;

    let descriptor = resolve(args.datum, args.grid, &grid_dir)
        .map_err(|e| errors::from_domain(e, args.datum, args.grid))?;

    let mut request = PlanRequest::new(&descriptor, args.direction, kind, args.input, args.output)
        .with_resource_exists(descriptor.resource_path().is_file());
    if let Some(layer) = layer {
        request = request.with_layer(layer);
    }
    let output_path =
        request.output_path().map_err(|e| errors::from_domain(e, args.datum, args.grid))?;
    let request = request.with_output_exists(output_path.exists());

    let plan = assemble(&request).map_err(|e| errors::from_domain(e, args.datum, args.grid))?;

    if request.output_exists {
        output.warning(existing_output_warning(kind, &output_path));
    }

    if dry_run {
        return display_planned_actions(output, &plan);
    }

    if !output.is_json() {
        let heading = match args.direction {
            Direction::Direct => "Direct",
            Direction::Inverse => "Inverse",
        };
        output.info(format!(
            "{} {} transformation: {} via {}",
            heading,
            kind,
            args.datum.label(),
            args.grid.label()
        ));
    }

    let runner = ProcessRunner::from_config(config);
    runner.run(&plan, &output_path).await?;

    if output.is_json() {
        output.result(TransformOutput {
            kind,
            direction: args.direction,
            descriptor: descriptor.clone(),
            output: output_path,
            steps: plan,
            executed: true,
        })?;
    } else {
        output.success(format!("Wrote {}", output_path.display()));
    }

    Ok(())
}

/// Neither engine is asked to replace an existing output, so say what
/// happens to it instead.
fn existing_output_warning(kind: DataKind, path: &Path) -> String {
    match kind {
        DataKind::Raster => format!(
            "{} already exists; gdalwarp will warp into the existing raster instead of replacing it",
            path.display()
        ),
        DataKind::Vector => format!(
            "{} already exists; ogr2ogr may refuse to write into it",
            path.display()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_raster_warning_does_not_promise_replacement() {
        let message = existing_output_warning(DataKind::Raster, Path::new("/data/dem.tif"));
        assert!(message.starts_with("/data/dem.tif already exists"));
        assert!(message.contains("warp into the existing raster"));
        assert!(!message.contains("written over"));
    }

    #[test]
    fn test_existing_vector_warning() {
        let message = existing_output_warning(DataKind::Vector, Path::new("/data/roads.shp"));
        assert!(message.contains("ogr2ogr"));
    }
}
