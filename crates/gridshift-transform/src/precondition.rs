//! Checks that must pass before a plan is assembled.
//!
//! Both inputs arrive as flags computed by the caller, so nothing here
//! touches the filesystem.

use gridshift_core::error::{GridshiftError, Result};
use gridshift_core::models::{GridId, Precondition, TransformationDescriptor};
use std::path::Path;

/// Operator instructions for placing a grid that is not on disk
pub fn resource_guidance(grid: GridId, target: &Path) -> String {
    format!(
        "ERROR GRID FILE NOT FOUND / USER ACTION REQUIRED:\n\
         The grid file {name} is too big to be downloaded in the background ({size}), \
         but therefore has a high transformation accuracy of {accuracy}.\n\n\
         Following steps are required:\n\
         1. Download the grid from \"{source}\"\n\
         2. Unzip the file and rename it to \"{name}\"\n\
         3. Move the file to following location: \"{target}\"",
        name = grid.filename(),
        size = grid.size(),
        accuracy = grid.accuracy(),
        source = grid.source(),
        target = target.display(),
    )
}

/// Run the checks in order; the first failure wins.
///
/// `transactional_output` is `None` for raster data, which is never subject
/// to the overwrite check.
pub fn check(
    descriptor: &TransformationDescriptor,
    resource_exists: bool,
    transactional_output: Option<&Path>,
    output_exists: bool,
) -> Precondition {
    if !resource_exists {
        tracing::error!(
            resource = descriptor.required_resource_name(),
            path = %descriptor.resource_path().display(),
            "Grid file not found"
        );
        return Precondition::ResourceMissing {
            resource: descriptor.required_resource_name().to_string(),
            guidance: resource_guidance(descriptor.grid(), descriptor.resource_path()),
        };
    }

    if let Some(path) = transactional_output {
        if output_exists {
            return Precondition::OutputAlreadyExists { path: path.to_path_buf() };
        }
    }

    Precondition::Ok
}

/// Turn a failed precondition into its error
pub fn ensure(precondition: Precondition) -> Result<()> {
    match precondition {
        Precondition::Ok => Ok(()),
        Precondition::ResourceMissing { resource, guidance } => {
            Err(GridshiftError::ResourceMissing { resource, guidance })
        }
        Precondition::OutputAlreadyExists { path } => {
            Err(GridshiftError::OutputAlreadyExists { path })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridshift_core::models::DatumId;

    fn descriptor() -> TransformationDescriptor {
        crate::registry::resolve(DatumId::Gk4, GridId::ByKanu, Path::new("/plugin/grids")).unwrap()
    }

    #[test]
    fn test_guidance_is_actionable() {
        let text = resource_guidance(GridId::ByKanu, Path::new("/plugin/grids/BY_KANU.gsb"));
        assert!(text.contains("BY_KANU.gsb"));
        assert!(text.contains("3.03 GB"));
        assert!(text.contains("+- 1cm"));
        assert!(text.contains("ntv2_bayern.zip"));
        assert!(text.contains("\"/plugin/grids/BY_KANU.gsb\""));
    }

    #[test]
    fn test_missing_resource_wins_over_existing_output() {
        let d = descriptor();
        let result = check(&d, false, Some(Path::new("/out.gpkg")), true);
        assert!(matches!(result, Precondition::ResourceMissing { ref resource, .. } if resource == "BY_KANU.gsb"));
    }

    #[test]
    fn test_existing_transactional_output() {
        let d = descriptor();
        let result = check(&d, true, Some(Path::new("/out.gpkg")), true);
        assert_eq!(result, Precondition::OutputAlreadyExists { path: "/out.gpkg".into() });
    }

    #[test]
    fn test_non_transactional_output_may_exist() {
        let d = descriptor();
        assert_eq!(check(&d, true, None, true), Precondition::Ok);
    }

    #[test]
    fn test_ensure_maps_to_errors() {
        assert!(ensure(Precondition::Ok).is_ok());
        let err = ensure(Precondition::OutputAlreadyExists { path: "/out.gpkg".into() })
            .unwrap_err();
        assert!(matches!(err, GridshiftError::OutputAlreadyExists { .. }));
        assert_eq!(err.to_string(), "Output file \"/out.gpkg\" already exists");
    }
}
