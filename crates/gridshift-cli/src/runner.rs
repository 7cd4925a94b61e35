//! Executes assembled plans with the GDAL command-line tools.

use async_trait::async_trait;
use gridshift_core::config::LayeredConfig;
use gridshift_core::error::{GridshiftError, Result};
use gridshift_core::models::{Engine, OperationStep};
use gridshift_core::ports::PlanRunner;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::SystemTime;
use tokio::process::Command;

/// Sidecar files written next to a Shapefile
const SHAPEFILE_PARTS: &[&str] = &["shp", "shx", "dbf", "prj", "cpg", "qix"];

/// Runs plan steps as child processes.
///
/// A step writing `/vsistdout/` followed by one reading `/vsistdin/` is run
/// as a pipe: both processes run concurrently and the first one's stdout is
/// copied into the second one's stdin.
pub struct ProcessRunner {
    gdalwarp: String,
    ogr2ogr: String,
}

impl ProcessRunner {
    pub fn from_config(config: &LayeredConfig) -> Self {
        Self {
            gdalwarp: config.program_for(Engine::Gdalwarp).to_string(),
            ogr2ogr: config.program_for(Engine::Ogr2ogr).to_string(),
        }
    }

    fn command(&self, step: &OperationStep) -> Command {
        let program = match step.engine {
            Engine::Gdalwarp => &self.gdalwarp,
            Engine::Ogr2ogr => &self.ogr2ogr,
        };
        let mut cmd = Command::new(program);
        cmd.args(&step.args).kill_on_drop(true);
        cmd
    }

    async fn run_single(&self, step: &OperationStep) -> Result<()> {
        tracing::info!("Running {}", step.engine);
        tracing::debug!("{}", step.command_line());

        let status = self.command(step).status().await.map_err(|e| spawn_error(step, e))?;
        check_status(step, status)
    }

    async fn run_chained(&self, producer: &OperationStep, consumer: &OperationStep) -> Result<()> {
        tracing::info!("Running {} | {}", producer.engine, consumer.engine);
        tracing::debug!("{} | {}", producer.command_line(), consumer.command_line());

        let mut upstream = self
            .command(producer)
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| spawn_error(producer, e))?;
        let mut downstream = self
            .command(consumer)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| spawn_error(consumer, e))?;

        let mut reader = upstream.stdout.take().ok_or_else(|| GridshiftError::EngineFailed {
            engine: producer.engine.to_string(),
            reason: "stdout was not captured".to_string(),
        })?;
        let mut writer = downstream.stdin.take().ok_or_else(|| GridshiftError::EngineFailed {
            engine: consumer.engine.to_string(),
            reason: "stdin was not captured".to_string(),
        })?;

        let pump = async move {
            let copied = tokio::io::copy(&mut reader, &mut writer).await;
            // Closing stdin lets the consumer see end of stream
            drop(writer);
            copied
        };

        let (copied, upstream_status, downstream_status) =
            tokio::join!(pump, upstream.wait(), downstream.wait());

        check_status(producer, upstream_status?)?;
        check_status(consumer, downstream_status?)?;
        let bytes = copied?;
        tracing::debug!(bytes, "Streamed between steps");
        Ok(())
    }

    async fn run_steps(&self, plan: &[OperationStep]) -> Result<()> {
        let mut i = 0;
        while i < plan.len() {
            let step = &plan[i];
            match plan.get(i + 1) {
                Some(next) if step.writes_stdout() && next.reads_stdin() => {
                    self.run_chained(step, next).await?;
                    i += 2;
                }
                _ if step.writes_stdout() || step.reads_stdin() => {
                    return Err(GridshiftError::EngineFailed {
                        engine: step.engine.to_string(),
                        reason: "streaming step has no counterpart in the plan".to_string(),
                    });
                }
                _ => {
                    self.run_single(step).await?;
                    i += 1;
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl PlanRunner for ProcessRunner {
    async fn run(&self, plan: &[OperationStep], output: &Path) -> Result<()> {
        let before = snapshot(output);

        match self.run_steps(plan).await {
            Ok(()) => Ok(()),
            Err(e) => {
                discard_partial_output(output, &before);
                Err(e)
            }
        }
    }
}

fn spawn_error(step: &OperationStep, err: std::io::Error) -> GridshiftError {
    GridshiftError::EngineFailed {
        engine: step.engine.to_string(),
        reason: format!("could not be started: {}", err),
    }
}

fn check_status(step: &OperationStep, status: ExitStatus) -> Result<()> {
    if status.success() {
        return Ok(());
    }
    Err(GridshiftError::EngineFailed {
        engine: step.engine.to_string(),
        reason: match status.code() {
            Some(code) => format!("exited with status {}", code),
            None => "terminated by signal".to_string(),
        },
    })
}

/// Every file a plan may write for `output`
fn output_files(output: &Path) -> Vec<PathBuf> {
    let is_shapefile = output
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("shp"));

    if is_shapefile {
        SHAPEFILE_PARTS.iter().map(|ext| output.with_extension(ext)).collect()
    } else {
        vec![output.to_path_buf()]
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

fn snapshot(output: &Path) -> Vec<(PathBuf, Option<SystemTime>)> {
    output_files(output)
        .into_iter()
        .map(|p| {
            let mtime = modified(&p);
            (p, mtime)
        })
        .collect()
}

/// Remove files created or touched by a failed plan. Files left untouched
/// since the snapshot are kept.
fn discard_partial_output(output: &Path, before: &[(PathBuf, Option<SystemTime>)]) {
    for (path, mtime) in before {
        let now = modified(path);
        if now.is_none() || now == *mtime {
            continue;
        }
        match std::fs::remove_file(path) {
            Ok(()) => tracing::warn!("Removed incomplete output {}", path.display()),
            Err(e) => tracing::error!(
                "Failed to remove incomplete output {}: {}",
                path.display(),
                e
            ),
        }
    }
    tracing::debug!("Cleanup finished for {}", output.display());
}
