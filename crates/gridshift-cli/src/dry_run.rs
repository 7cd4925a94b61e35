use crate::output::OutputWriter;
use anyhow::Result;
use gridshift_core::models::{Engine, OperationStep};
use serde::Serialize;

/// Represents a planned engine invocation in dry-run mode
#[derive(Debug, Clone, Serialize)]
pub struct PlannedAction {
    pub action_type: ActionType,
    pub description: String,
    pub details: Vec<String>,
}

/// Types of actions a plan can contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    WarpRaster,
    ReprojectVector,
    /// Reproject and stream to the next step
    StreamVector,
    /// Declare a CRS on streamed features without reprojecting
    AssignCrs,
}

impl PlannedAction {
    /// Create a new planned action
    pub fn new(action_type: ActionType, description: impl Into<String>) -> Self {
        Self {
            action_type,
            description: description.into(),
            details: Vec::new(),
        }
    }

    /// Add a detail to the planned action
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }

    /// Describe one step of an assembled plan
    pub fn from_step(step: &OperationStep) -> Self {
        let action_type = match step.engine {
            Engine::Gdalwarp => ActionType::WarpRaster,
            Engine::Ogr2ogr if step.writes_stdout() => ActionType::StreamVector,
            Engine::Ogr2ogr if step.assigned_crs().is_some() => ActionType::AssignCrs,
            Engine::Ogr2ogr => ActionType::ReprojectVector,
        };

        let description = match action_type {
            ActionType::AssignCrs => format!(
                "Write streamed features declared as {}",
                step.assigned_crs().unwrap_or_default()
            ),
            ActionType::StreamVector => "Reproject features and stream them as GeoJSON".to_string(),
            _ => format!("Reproject with {}", step.engine),
        };

        let mut action = Self::new(action_type, description);
        if let Some(source) = step.source_crs() {
            action = action.with_detail(format!("From: {}", source));
        }
        if let Some(target) = step.target_crs() {
            action = action.with_detail(format!("To: {}", target));
        }
        action.with_detail(format!("Command: {}", step.command_line()))
    }
}

/// Display an assembled plan in dry-run mode
pub fn display_planned_actions(output: &OutputWriter, plan: &[OperationStep]) -> Result<()> {
    let actions: Vec<PlannedAction> = plan.iter().map(PlannedAction::from_step).collect();

    if output.is_json() {
        return output.result(serde_json::json!({
            "dry_run": true,
            "planned_actions": actions,
            "steps": plan,
        }));
    }

    output.section("Planned Actions (Dry Run)");
    for (i, action) in actions.iter().enumerate() {
        output.info(format!("{}. {:?}: {}", i + 1, action.action_type, action.description));
        for detail in &action.details {
            output.info(format!("   - {}", detail));
        }
    }
    if plan.len() > 1 {
        output.info("Steps are piped into each other and run as a single unit.");
    }
    output.info("\nNo changes were made. Run without --dry-run to execute these actions.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridshift_core::models::plan::{VSI_STDIN, VSI_STDOUT};

    #[test]
    fn test_planned_action_creation() {
        let action = PlannedAction::new(ActionType::WarpRaster, "Reproject with gdalwarp")
            .with_detail("From: EPSG:25832")
            .with_detail("To: +proj=tmerc");

        assert_eq!(action.description, "Reproject with gdalwarp");
        assert_eq!(action.details.len(), 2);
    }

    #[test]
    fn test_chained_steps_classified() {
        let stream = OperationStep::new(Engine::Ogr2ogr)
            .opt("-s_srs", "EPSG:25832")
            .opt("-t_srs", "+proj=tmerc")
            .arg(VSI_STDOUT);
        let assign = OperationStep::new(Engine::Ogr2ogr)
            .opt("-a_srs", "EPSG:5678")
            .arg("out.gpkg")
            .arg(VSI_STDIN);

        assert_eq!(PlannedAction::from_step(&stream).action_type, ActionType::StreamVector);
        let assign = PlannedAction::from_step(&assign);
        assert_eq!(assign.action_type, ActionType::AssignCrs);
        assert!(assign.description.contains("EPSG:5678"));
    }

    #[test]
    fn test_display_reports_success() {
        let plan = vec![OperationStep::new(Engine::Gdalwarp).arg("in.tif").arg("out.tif")];
        assert!(display_planned_actions(&OutputWriter::new(true), &plan).is_ok());
        assert!(display_planned_actions(&OutputWriter::new(false), &plan).is_ok());
    }

    #[test]
    fn test_action_type_serialization() {
        let action = PlannedAction::new(ActionType::AssignCrs, "Declare CRS");
        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("assign_crs"));
    }
}
