//! Operation plan types handed to the GDAL engines.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// GDAL virtual file that streams a dataset to standard output
pub const VSI_STDOUT: &str = "/vsistdout/";

/// GDAL virtual file that reads a dataset from standard input
pub const VSI_STDIN: &str = "/vsistdin/";

/// External reprojection engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// Raster reprojection
    Gdalwarp,
    /// Vector reprojection
    Ogr2ogr,
}

impl Engine {
    /// Default executable name
    pub fn program(&self) -> &'static str {
        match self {
            Engine::Gdalwarp => "gdalwarp",
            Engine::Ogr2ogr => "ogr2ogr",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

/// One engine invocation. Argument order is significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationStep {
    pub engine: Engine,
    pub args: Vec<String>,
}

impl OperationStep {
    pub fn new(engine: Engine) -> Self {
        Self { engine, args: Vec::new() }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append an option flag followed by its value
    pub fn opt(self, flag: &str, value: impl Into<String>) -> Self {
        self.arg(flag).arg(value)
    }

    /// Value following the first occurrence of `flag`
    pub fn option_value(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }

    pub fn source_crs(&self) -> Option<&str> {
        self.option_value("-s_srs")
    }

    pub fn target_crs(&self) -> Option<&str> {
        self.option_value("-t_srs")
    }

    /// CRS assigned without reprojection
    pub fn assigned_crs(&self) -> Option<&str> {
        self.option_value("-a_srs")
    }

    pub fn writes_stdout(&self) -> bool {
        self.args.iter().any(|a| a == VSI_STDOUT)
    }

    pub fn reads_stdin(&self) -> bool {
        self.args.iter().any(|a| a == VSI_STDIN)
    }

    /// Shell-quoted rendering for display
    pub fn command_line(&self) -> String {
        let mut parts = vec![self.engine.program().to_string()];
        parts.extend(self.args.iter().map(|a| shell_quote(a)));
        parts.join(" ")
    }
}

impl fmt::Display for OperationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=+,@%".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// Outcome of the checks run before a plan is assembled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Precondition {
    Ok,
    ResourceMissing { resource: String, guidance: String },
    OutputAlreadyExists { path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_lookup() {
        let step = OperationStep::new(Engine::Gdalwarp)
            .opt("-s_srs", "EPSG:25832")
            .opt("-t_srs", "+proj=tmerc")
            .arg("-multi");
        assert_eq!(step.source_crs(), Some("EPSG:25832"));
        assert_eq!(step.target_crs(), Some("+proj=tmerc"));
        assert_eq!(step.assigned_crs(), None);
    }

    #[test]
    fn test_command_line_quotes_spaces() {
        let step = OperationStep::new(Engine::Ogr2ogr)
            .opt("-t_srs", "+proj=tmerc +lon_0=12")
            .arg("/data/out.gpkg");
        assert_eq!(step.command_line(), "ogr2ogr -t_srs '+proj=tmerc +lon_0=12' /data/out.gpkg");
    }

    #[test]
    fn test_stream_markers() {
        let producer = OperationStep::new(Engine::Ogr2ogr).arg(VSI_STDOUT);
        let consumer = OperationStep::new(Engine::Ogr2ogr).arg(VSI_STDIN);
        assert!(producer.writes_stdout() && !producer.reads_stdin());
        assert!(consumer.reads_stdin() && !consumer.writes_stdout());
    }

    #[test]
    fn test_precondition_serialization() {
        let json = serde_json::to_string(&Precondition::Ok).unwrap();
        assert!(json.contains("\"ok\""));
    }
}
