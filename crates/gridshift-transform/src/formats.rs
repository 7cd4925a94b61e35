//! GDAL driver selection for output locations

use gridshift_core::error::{GridshiftError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Lower-cased extension of a path, if any
fn extension(path: &Path) -> Option<String> {
    path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase())
}

/// GDAL raster driver for an output file, chosen by extension.
///
/// Unknown or missing extensions fall back to GTiff.
pub fn raster_driver_for(path: &Path) -> &'static str {
    match extension(path).as_deref() {
        Some("tif") | Some("tiff") => "GTiff",
        Some("vrt") => "VRT",
        Some("img") => "HFA",
        Some("jp2") => "JP2OpenJPEG",
        Some("png") => "PNG",
        Some("jpg") | Some("jpeg") => "JPEG",
        Some("asc") => "AAIGrid",
        Some("nc") => "netCDF",
        Some("sdat") => "SAGA",
        _ => "GTiff",
    }
}

/// OGR vector format of an output location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VectorOutput {
    /// OGR driver short name
    pub format: String,
    /// Datasource path with any driver prefix removed
    pub path: PathBuf,
}

impl VectorOutput {
    /// Derive the output format from an extension or a `DRIVER:path`
    /// connection string.
    ///
    /// Database connection strings (`PG:dbname=gis`) are passed to the engine
    /// whole. A prefix naming no known driver is rejected. Unknown extensions
    /// fall back to ESRI Shapefile.
    pub fn parse(location: &str) -> Result<Self> {
        if let Some((prefix, rest)) = location.split_once(':') {
            if let Some(format) = known_vector_driver(prefix) {
                return Ok(Self { format: format.to_string(), path: PathBuf::from(rest) });
            }
            if let Some(format) = database_driver(prefix) {
                return Ok(Self { format: format.to_string(), path: PathBuf::from(location) });
            }
            if is_driver_prefix(prefix) {
                return Err(GridshiftError::ConfigInvalid {
                    key: "output".to_string(),
                    reason: format!("Unknown connection string prefix: {}:", prefix),
                });
            }
        }

        let path = PathBuf::from(location);
        let format = vector_format_for(&path).to_string();
        Ok(Self { format, path })
    }

    /// Formats the engine updates in place rather than replacing, so an
    /// existing file cannot be overwritten safely.
    pub fn is_transactional(&self) -> bool {
        matches!(self.format.as_str(), "GPKG" | "SQLite")
    }
}

fn vector_format_for(path: &Path) -> &'static str {
    match extension(path).as_deref() {
        Some("gpkg") => "GPKG",
        Some("sqlite") | Some("db") => "SQLite",
        Some("shp") => "ESRI Shapefile",
        Some("geojson") | Some("json") => "GeoJSON",
        Some("gml") => "GML",
        Some("kml") => "KML",
        Some("csv") => "CSV",
        Some("dxf") => "DXF",
        Some("fgb") => "FlatGeobuf",
        Some("tab") | Some("mif") => "MapInfo File",
        _ => "ESRI Shapefile",
    }
}

/// Canonical driver name for a connection-string prefix.
///
/// Single-letter prefixes are never drivers so Windows drive letters pass
/// through as paths.
fn known_vector_driver(prefix: &str) -> Option<&'static str> {
    const DRIVERS: &[&str] = &[
        "GPKG",
        "SQLite",
        "ESRI Shapefile",
        "GeoJSON",
        "GML",
        "KML",
        "CSV",
        "DXF",
        "FlatGeobuf",
        "MapInfo File",
    ];
    if prefix.len() < 2 {
        return None;
    }
    DRIVERS.iter().copied().find(|d| d.eq_ignore_ascii_case(prefix))
}

/// Connection-string prefixes of database drivers and their OGR names
const DATABASE_DRIVERS: &[(&str, &str)] = &[
    ("PG", "PostgreSQL"),
    ("MSSQL", "MSSQLSpatial"),
    ("MYSQL", "MySQL"),
    ("OCI", "OCI"),
    ("ODBC", "ODBC"),
];

fn database_driver(prefix: &str) -> Option<&'static str> {
    DATABASE_DRIVERS
        .iter()
        .find(|(p, _)| p.eq_ignore_ascii_case(prefix))
        .map(|(_, driver)| *driver)
}

/// A bare token before the colon names a driver; anything with path
/// characters belongs to a file name.
fn is_driver_prefix(prefix: &str) -> bool {
    prefix.len() >= 2
        && prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_drivers() {
        assert_eq!(raster_driver_for(Path::new("/out/dem.tif")), "GTiff");
        assert_eq!(raster_driver_for(Path::new("/out/dem.TIFF")), "GTiff");
        assert_eq!(raster_driver_for(Path::new("/out/mosaic.vrt")), "VRT");
        assert_eq!(raster_driver_for(Path::new("/out/ortho.jp2")), "JP2OpenJPEG");
        assert_eq!(raster_driver_for(Path::new("/out/noext")), "GTiff");
    }

    #[test]
    fn test_vector_by_extension() {
        let out = VectorOutput::parse("/data/parcels.gpkg").unwrap();
        assert_eq!(out.format, "GPKG");
        assert_eq!(out.path, PathBuf::from("/data/parcels.gpkg"));
        assert!(out.is_transactional());

        let out = VectorOutput::parse("/data/parcels.shp").unwrap();
        assert_eq!(out.format, "ESRI Shapefile");
        assert!(!out.is_transactional());

        assert!(VectorOutput::parse("roads.sqlite").unwrap().is_transactional());
        assert_eq!(VectorOutput::parse("roads.geojson").unwrap().format, "GeoJSON");
    }

    #[test]
    fn test_vector_connection_string() {
        let out = VectorOutput::parse("gpkg:/data/out.dat").unwrap();
        assert_eq!(out.format, "GPKG");
        assert_eq!(out.path, PathBuf::from("/data/out.dat"));
    }

    #[test]
    fn test_drive_letter_is_not_a_driver() {
        let out = VectorOutput::parse("C:/data/out.gpkg").unwrap();
        assert_eq!(out.format, "GPKG");
        assert_eq!(out.path, PathBuf::from("C:/data/out.gpkg"));
    }

    #[test]
    fn test_unknown_vector_extension_defaults_to_shapefile() {
        assert_eq!(VectorOutput::parse("/data/out").unwrap().format, "ESRI Shapefile");
    }

    #[test]
    fn test_database_connection_string() {
        let out = VectorOutput::parse("PG:dbname=gis").unwrap();
        assert_eq!(out.format, "PostgreSQL");
        assert_eq!(out.path, PathBuf::from("PG:dbname=gis"));
        assert!(!out.is_transactional());

        let out = VectorOutput::parse("MSSQL:server=.;database=gis").unwrap();
        assert_eq!(out.format, "MSSQLSpatial");
    }

    #[test]
    fn test_unknown_connection_prefix_rejected() {
        let err = VectorOutput::parse("XYZ:dbname=gis").unwrap_err();
        assert!(matches!(err, GridshiftError::ConfigInvalid { ref key, .. } if key == "output"));
        assert!(err.to_string().contains("XYZ:"));
    }

    #[test]
    fn test_colon_inside_file_name_is_a_path() {
        let out = VectorOutput::parse("./exports/roads:v2.gpkg").unwrap();
        assert_eq!(out.format, "GPKG");
        assert_eq!(out.path, PathBuf::from("./exports/roads:v2.gpkg"));
    }
}
