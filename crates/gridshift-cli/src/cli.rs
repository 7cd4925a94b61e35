use clap::{Args, Parser, Subcommand};
use gridshift_core::models::{DatumId, Direction, GridId};
use std::path::PathBuf;

/// gridshift - NTv2 grid transformations between Gauss-Krüger and ETRS89 / UTM 32N
#[derive(Parser, Debug)]
#[command(name = "gridshift")]
#[command(about = "NTv2 grid transformations between Gauss-Krüger and ETRS89 / UTM 32N", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Show the assembled plan without executing it
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Path to a gridshift.toml config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the NTv2 grid files
    #[arg(long, global = true, value_name = "DIR")]
    pub grid_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transform a raster dataset with gdalwarp
    Raster(TransformArgs),

    /// Transform a vector dataset with ogr2ogr
    Vector(VectorArgs),

    /// List supported datum and grid combinations
    List,

    /// Check grid files and GDAL engines
    Doctor(DoctorArgs),

    /// Show effective configuration and where each value comes from
    Config,
}

#[derive(Args, Debug)]
pub struct TransformArgs {
    /// Legacy datum (gk3, gk4)
    #[arg(long, default_value = "gk4")]
    pub datum: DatumId,

    /// NTv2 grid (by-kanu)
    #[arg(long, default_value = "by-kanu")]
    pub grid: GridId,

    /// direct: legacy -> UTM32 [EPSG:25832], inverse: UTM32 [EPSG:25832] -> legacy
    #[arg(long, short = 'd', default_value = "direct")]
    pub direction: Direction,

    /// Input dataset (path or GDAL connection string)
    pub input: String,

    /// Output location; vector outputs accept a DRIVER:path prefix
    pub output: String,
}

#[derive(Args, Debug)]
pub struct VectorArgs {
    #[command(flatten)]
    pub transform: TransformArgs,

    /// Source layer to transform (defaults to all layers)
    #[arg(long)]
    pub layer: Option<String>,
}

#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Print the full guidance for grids that are missing
    #[arg(long)]
    pub details: bool,
}
