//! Integration tests for the gridshift binary
//!
//! These tests only use --dry-run, list and failure paths so GDAL does not
//! need to be installed.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn gridshift(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gridshift"))
        .current_dir(cwd)
        .env_remove("GRIDSHIFT_GRID_DIR")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn workspace_with_grid() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("grids")).unwrap();
    std::fs::write(dir.path().join("grids").join("BY_KANU.gsb"), b"placeholder").unwrap();
    dir
}

fn json_data(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("Output should be valid JSON");
    assert_eq!(parsed["status"], "success");
    parsed["data"].clone()
}

#[test]
fn test_list_json() {
    let dir = TempDir::new().unwrap();
    let output = gridshift(dir.path(), &["list", "--json"]);

    assert!(output.status.success());
    let data = json_data(&output);
    assert_eq!(data["target_crs"], "EPSG:25832");
    let entries = data["transformations"].as_array().unwrap();
    assert!(entries.iter().any(|e| e["grid"] == "BY_KANU" && e["legacy_crs"] == "EPSG:5678"));
}

#[test]
fn test_raster_dry_run_plan() {
    let dir = workspace_with_grid();
    let output = gridshift(
        dir.path(),
        &["raster", "--dry-run", "--json", "--datum", "gk4", "--grid", "by-kanu", "in.tif", "out.tif"],
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let data = json_data(&output);
    assert_eq!(data["dry_run"], true);

    let steps = data["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0]["engine"], "gdalwarp");
    assert_eq!(steps[0]["args"][3], "EPSG:25832");
    let source = steps[0]["args"][1].as_str().unwrap();
    assert!(source.contains("BY_KANU.gsb"));
    assert!(!dir.path().join("out.tif").exists(), "dry run must not write output");
}

#[test]
fn test_vector_inverse_dry_run_has_two_steps() {
    let dir = workspace_with_grid();
    let output = gridshift(
        dir.path(),
        &["vector", "--dry-run", "--json", "--direction", "inverse", "in.shp", "out.gpkg"],
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let steps = json_data(&output)["steps"].as_array().unwrap().clone();
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[1]["args"][3], "EPSG:5678");
}

#[test]
fn test_missing_grid_fails_with_guidance() {
    let dir = TempDir::new().unwrap();
    let output = gridshift(dir.path(), &["raster", "--dry-run", "in.tif", "out.tif"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Grid file not found"));
    assert!(stderr.contains("BY_KANU.gsb"));
    assert_eq!(
        stderr.matches("USER ACTION REQUIRED").count(),
        1,
        "guidance should be printed once: {}",
        stderr
    );
}

#[test]
fn test_existing_geopackage_refused() {
    let dir = workspace_with_grid();
    std::fs::write(dir.path().join("out.gpkg"), b"existing").unwrap();

    let output = gridshift(dir.path(), &["vector", "--dry-run", "in.shp", "out.gpkg"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Output file already exists"));
}

#[test]
fn test_unsupported_combination() {
    let dir = workspace_with_grid();
    let output = gridshift(
        dir.path(),
        &["raster", "--dry-run", "--datum", "gk3", "--grid", "by-kanu", "in.tif", "out.tif"],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Transformation not supported"));
}

#[test]
fn test_grid_dir_from_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("ntv2")).unwrap();
    std::fs::write(dir.path().join("ntv2").join("BY_KANU.gsb"), b"placeholder").unwrap();
    std::fs::write(dir.path().join("gridshift.toml"), "grid_dir = \"ntv2\"\n").unwrap();

    let output = gridshift(dir.path(), &["raster", "--dry-run", "--json", "in.tif", "out.tif"]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let steps = json_data(&output)["steps"].as_array().unwrap().clone();
    assert!(steps[0]["args"][1].as_str().unwrap().contains("ntv2"));
}

#[test]
fn test_vector_inverse_into_postgres() {
    let dir = workspace_with_grid();
    let output = gridshift(
        dir.path(),
        &["vector", "--dry-run", "--json", "-d", "inverse", "in.gpkg", "PG:dbname=gis"],
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let steps = json_data(&output)["steps"].as_array().unwrap().clone();
    assert_eq!(steps[1]["args"][1], "PostgreSQL");
    assert_eq!(steps[1]["args"][6], "PG:dbname=gis");
}

#[test]
fn test_unknown_connection_prefix_fails() {
    let dir = workspace_with_grid();
    let output = gridshift(dir.path(), &["vector", "--dry-run", "in.gpkg", "NOPE:dbname=gis"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown connection string prefix"));
}
