use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::identifiers::{DatumId, GridId};
use crate::error::{GridshiftError, Result};

/// ETRS89 / UTM zone 32N, the only modern system gridshift targets
pub const MODERN_CRS: &str = "EPSG:25832";

pub const MODERN_CRS_NAME: &str = "ETRS89 / UTM zone 32N";

/// Transformation direction relative to the legacy -> modern axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Legacy datum -> ETRS89 / UTM 32N
    #[default]
    Direct,
    /// ETRS89 / UTM 32N -> legacy datum
    Inverse,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Direct, Direction::Inverse];
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Direct => f.write_str("direct"),
            Direction::Inverse => f.write_str("inverse"),
        }
    }
}

impl FromStr for Direction {
    type Err = GridshiftError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "direct" | "d" => Ok(Direction::Direct),
            "inverse" | "i" => Ok(Direction::Inverse),
            _ => Err(GridshiftError::ConfigInvalid {
                key: "direction".to_string(),
                reason: format!("Invalid direction: {}. Use direct or inverse", s),
            }),
        }
    }
}

/// Kind of data being reprojected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataKind {
    Raster,
    Vector,
}

impl DataKind {
    pub const ALL: [DataKind; 2] = [DataKind::Raster, DataKind::Vector];
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataKind::Raster => f.write_str("raster"),
            DataKind::Vector => f.write_str("vector"),
        }
    }
}

/// Fully resolved transformation between a legacy datum and ETRS89 / UTM 32N.
///
/// Only the registry builds these, and only for supported (datum, grid)
/// pairs. The source definition already embeds the grid path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformationDescriptor {
    datum: DatumId,
    grid: GridId,
    source_crs_definition: String,
    target_crs_identifier: String,
    required_resource_name: String,
    resource_path: PathBuf,
}

impl TransformationDescriptor {
    pub fn new(
        datum: DatumId,
        grid: GridId,
        source_crs_definition: impl Into<String>,
        resource_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            datum,
            grid,
            source_crs_definition: source_crs_definition.into(),
            target_crs_identifier: MODERN_CRS.to_string(),
            required_resource_name: grid.filename().to_string(),
            resource_path: resource_path.into(),
        }
    }

    pub fn datum(&self) -> DatumId {
        self.datum
    }

    pub fn grid(&self) -> GridId {
        self.grid
    }

    /// PROJ definition of the legacy side, grid-corrected
    pub fn source_crs_definition(&self) -> &str {
        &self.source_crs_definition
    }

    pub fn target_crs_identifier(&self) -> &str {
        &self.target_crs_identifier
    }

    pub fn required_resource_name(&self) -> &str {
        &self.required_resource_name
    }

    /// Where the grid file is expected on disk
    pub fn resource_path(&self) -> &Path {
        &self.resource_path
    }

    /// Identifier declared on data written back into the legacy datum
    pub fn legacy_crs_identifier(&self) -> String {
        self.datum.crs_identifier()
    }

    /// (source, target) CRS arguments for the given direction
    pub fn crs_pair(&self, direction: Direction) -> (&str, &str) {
        match direction {
            Direction::Direct => (&self.source_crs_definition, &self.target_crs_identifier),
            Direction::Inverse => (&self.target_crs_identifier, &self.source_crs_definition),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> TransformationDescriptor {
        TransformationDescriptor::new(
            DatumId::Gk4,
            GridId::ByKanu,
            "+proj=tmerc +nadgrids=/grids/BY_KANU.gsb",
            "/grids/BY_KANU.gsb",
        )
    }

    #[test]
    fn test_descriptor_fields() {
        let d = descriptor();
        assert_eq!(d.target_crs_identifier(), MODERN_CRS);
        assert_eq!(d.required_resource_name(), "BY_KANU.gsb");
        assert_eq!(d.legacy_crs_identifier(), "EPSG:5678");
    }

    #[test]
    fn test_crs_pair_swaps_roles() {
        let d = descriptor();
        let (s, t) = d.crs_pair(Direction::Direct);
        let (inv_s, inv_t) = d.crs_pair(Direction::Inverse);
        assert_eq!(s, inv_t);
        assert_eq!(t, inv_s);
        assert_eq!(t, "EPSG:25832");
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!("direct".parse::<Direction>().unwrap(), Direction::Direct);
        assert_eq!("INVERSE".parse::<Direction>().unwrap(), Direction::Inverse);
        assert!("sideways".parse::<Direction>().is_err());
    }
}
