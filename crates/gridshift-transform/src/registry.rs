//! Closed registry of supported (datum, grid) transformations.
//!
//! Each entry pairs a legacy datum with the NTv2 grid that corrects it and the
//! Transverse Mercator template describing the legacy projection. Supporting a
//! new combination means adding an entry to [`REGISTRY`]; nothing here is
//! configurable at runtime.

use gridshift_core::error::{GridshiftError, Result};
use gridshift_core::models::{DatumId, GridId, TransformationDescriptor};
use serde::Serialize;
use std::path::Path;

/// Unparameterized projection of a legacy datum.
///
/// Rendering adds the grid shift (`+nadgrids`) which depends on where the
/// grid lives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectionTemplate {
    pub method: &'static str,
    pub lat_0: f64,
    pub lon_0: f64,
    pub k: f64,
    pub x_0: f64,
    pub y_0: f64,
    pub ellps: &'static str,
    pub units: &'static str,
}

impl ProjectionTemplate {
    /// Gauss-Krüger strip on the Bessel ellipsoid
    const fn gauss_krueger(lon_0: f64, x_0: f64) -> Self {
        Self {
            method: "tmerc",
            lat_0: 0.0,
            lon_0,
            k: 1.0,
            x_0,
            y_0: 0.0,
            ellps: "bessel",
            units: "m",
        }
    }

    /// PROJ string with the grid at `grid_path`
    pub fn render(&self, grid_path: &Path) -> String {
        format!(
            "+proj={} +lat_0={} +lon_0={} +k={} +x_0={} +y_0={} +ellps={} +nadgrids={} +units={} +no_defs",
            self.method,
            self.lat_0,
            self.lon_0,
            self.k,
            self.x_0,
            self.y_0,
            self.ellps,
            grid_path.display(),
            self.units,
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RegistryEntry {
    pub datum: DatumId,
    pub grid: GridId,
    pub projection: ProjectionTemplate,
}

pub const REGISTRY: &[RegistryEntry] = &[
    RegistryEntry {
        datum: DatumId::Gk4,
        grid: GridId::ByKanu,
        projection: ProjectionTemplate::gauss_krueger(12.0, 4_500_000.0),
    },
];

/// All supported combinations, in registry order
pub fn entries() -> &'static [RegistryEntry] {
    REGISTRY
}

pub fn lookup(datum: DatumId, grid: GridId) -> Option<&'static RegistryEntry> {
    REGISTRY.iter().find(|e| e.datum == datum && e.grid == grid)
}

/// Resolve a (datum, grid) pair into a transformation descriptor.
///
/// The grid is expected at `resource_dir/<grid filename>`; the path is joined
/// as given and never checked here.
pub fn resolve(
    datum: DatumId,
    grid: GridId,
    resource_dir: &Path,
) -> Result<TransformationDescriptor> {
    let entry = lookup(datum, grid).ok_or_else(|| GridshiftError::TransformationNotFound {
        datum: datum.label().to_string(),
        grid: grid.label().to_string(),
    })?;

    let resource_path = resource_dir.join(grid.filename());
    let definition = entry.projection.render(&resource_path);

    tracing::debug!(%datum, %grid, definition = %definition, "Resolved transformation");

    Ok(TransformationDescriptor::new(datum, grid, definition, resource_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_gk4_by_kanu_definition() {
        let d = resolve(DatumId::Gk4, GridId::ByKanu, Path::new("/opt/grids")).unwrap();
        assert_eq!(
            d.source_crs_definition(),
            "+proj=tmerc +lat_0=0 +lon_0=12 +k=1 +x_0=4500000 +y_0=0 +ellps=bessel \
             +nadgrids=/opt/grids/BY_KANU.gsb +units=m +no_defs"
        );
        assert_eq!(d.target_crs_identifier(), "EPSG:25832");
        assert_eq!(d.required_resource_name(), "BY_KANU.gsb");
        assert_eq!(d.resource_path(), PathBuf::from("/opt/grids/BY_KANU.gsb"));
    }

    #[test]
    fn test_relative_grid_dir_joined_verbatim() {
        let d = resolve(DatumId::Gk4, GridId::ByKanu, Path::new("grids")).unwrap();
        assert!(d.source_crs_definition().contains("+nadgrids=grids/BY_KANU.gsb "));
    }

    #[test]
    fn test_unsupported_pair_names_both() {
        let err = resolve(DatumId::Gk3, GridId::ByKanu, Path::new("/opt/grids")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Gauss-Krüger zone 3"));
        assert!(message.contains("BY-KanU"));
    }

    #[test]
    fn test_registry_has_no_duplicates() {
        for (i, a) in REGISTRY.iter().enumerate() {
            for b in &REGISTRY[i + 1..] {
                assert!(!(a.datum == b.datum && a.grid == b.grid));
            }
        }
    }
}
