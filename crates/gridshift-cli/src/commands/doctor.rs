use crate::cli::DoctorArgs;
use crate::output::OutputWriter;
use crate::output_types::{DoctorOutput, EngineCheck, GridCheck};
use anyhow::Result;
use console::style;
use gridshift_core::config::LayeredConfig;
use gridshift_core::models::Engine;
use gridshift_transform::precondition::resource_guidance;
use gridshift_transform::registry;
use std::path::Path;
use std::process::Command;

pub fn execute(args: DoctorArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let grid_dir = config.absolute_grid_dir()?;

    let grids = check_grids(&grid_dir);
    let engines: Vec<EngineCheck> = [Engine::Gdalwarp, Engine::Ogr2ogr]
        .into_iter()
        .map(|engine| check_engine(engine, config.program_for(engine)))
        .collect();

    let healthy = engines.iter().all(|e| e.version.is_some()) && grids.iter().any(|g| g.present);

    if output.is_json() {
        return output.result(DoctorOutput { grid_dir, grids, engines, healthy });
    }

    println!("\n{}", style("gridshift Health Check").bold().underlined());
    println!("{}", style("═".repeat(60)).dim());
    println!();
    println!("Grid directory: {}", grid_dir.display());
    println!();

    println!("{}", style("Grid Files").bold());
    println!("{}", style("─".repeat(60)).dim());
    for grid in &grids {
        if grid.present {
            println!("{} {}: Found", style("✓").green(), grid.grid.filename());
        } else {
            println!("{} {}: Not found", style("✗").red(), grid.grid.filename());
            match (&grid.guidance, args.details) {
                (Some(guidance), true) => {
                    for line in guidance.lines() {
                        println!("  {}", line);
                    }
                }
                _ => println!(
                    "  → Download from {} ({}); run with --details for steps",
                    grid.grid.source(),
                    grid.grid.size()
                ),
            }
        }
    }

    println!();
    println!("{}", style("GDAL Engines").bold());
    println!("{}", style("─".repeat(60)).dim());
    for engine in &engines {
        match &engine.version {
            Some(version) => {
                println!("{} {}: {}", style("✓").green(), engine.engine, version);
            }
            None => {
                println!("{} {}: '{}' not found", style("✗").red(), engine.engine, engine.program);
                println!("  → Install GDAL or set GRIDSHIFT_{}", engine.engine.to_uppercase());
            }
        }
    }

    println!();
    if healthy {
        println!("{} Ready to transform", style("✓").green().bold());
    } else {
        println!("{} Some checks failed", style("⚠").yellow().bold());
    }

    Ok(())
}

/// One check per distinct grid in the registry
fn check_grids(grid_dir: &Path) -> Vec<GridCheck> {
    let mut checks: Vec<GridCheck> = Vec::new();
    for entry in registry::entries() {
        if checks.iter().any(|c| c.grid == entry.grid) {
            continue;
        }
        let path = grid_dir.join(entry.grid.filename());
        let present = path.is_file();
        let guidance = (!present).then(|| resource_guidance(entry.grid, &path));
        checks.push(GridCheck { grid: entry.grid, path, present, guidance });
    }
    checks
}

fn check_engine(engine: Engine, program: &str) -> EngineCheck {
    let version = Command::new(program)
        .arg("--version")
        .output()
        .ok()
        .filter(|out| out.status.success())
        .map(|out| String::from_utf8_lossy(&out.stdout).trim().to_string());

    EngineCheck { engine: engine.to_string(), program: program.to_string(), version }
}
