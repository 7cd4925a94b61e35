use console::style;
use gridshift_core::error::GridshiftError;
use gridshift_core::models::{DatumId, GridId};
use gridshift_transform::registry;
use std::fmt;
use std::path::Path;

/// Enhanced error type with suggestions
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Create error for an unsupported datum/grid combination
pub fn transformation_not_found(datum: DatumId, grid: GridId) -> CliError {
    let supported: Vec<String> = registry::entries()
        .iter()
        .map(|e| format!("--datum {} --grid {}", e.datum, e.grid.key().to_lowercase().replace('_', "-")))
        .collect();

    CliError::new("Transformation not supported")
        .with_context(format!(
            "The grid {} cannot be used with data in {}.\n\nSupported combinations:\n  {}",
            grid.label(),
            datum.label(),
            supported.join("\n  ")
        ))
        .with_suggestion("Pick the grid that covers the region of your data")
        .with_help("Run: gridshift list")
}

/// Create error for a grid file that has not been placed yet
pub fn grid_missing(guidance: &str) -> CliError {
    CliError::new("Grid file not found")
        .with_context(guidance.to_string())
        .with_suggestion("If the grid is already stored elsewhere, pass --grid-dir DIR")
        .with_help("Run: gridshift doctor")
}

/// Create error for an output that cannot be overwritten
pub fn output_exists(path: &Path) -> CliError {
    CliError::new("Output file already exists")
        .with_context(format!(
            "GeoPackage and SQLite outputs are updated in place and cannot be overwritten safely.\n\nPath: {}",
            path.display()
        ))
        .with_suggestion("Delete or rename the existing file")
        .with_suggestion("Or choose a different output path")
}

/// Map domain failures to their human-facing form
pub fn from_domain(err: GridshiftError, datum: DatumId, grid: GridId) -> anyhow::Error {
    match err {
        GridshiftError::TransformationNotFound { .. } => transformation_not_found(datum, grid).into(),
        GridshiftError::ResourceMissing { guidance, .. } => grid_missing(&guidance).into(),
        GridshiftError::OutputAlreadyExists { path } => output_exists(&path).into(),
        other => other.into(),
    }
}
