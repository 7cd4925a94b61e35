//! List command implementation

use crate::output::OutputWriter;
use crate::output_types::{ListOutput, RegistryEntryInfo};
use anyhow::Result;
use gridshift_core::models::{MODERN_CRS, MODERN_CRS_NAME};
use gridshift_transform::registry;
use tabled::Tabled;

pub fn execute(output: &OutputWriter) -> Result<()> {
    let entries: Vec<RegistryEntryInfo> = registry::entries()
        .iter()
        .map(|e| RegistryEntryInfo {
            datum: e.datum,
            datum_label: e.datum.label(),
            legacy_crs: e.datum.crs_identifier(),
            grid: e.grid,
            grid_label: e.grid.label(),
            grid_file: e.grid.filename(),
        })
        .collect();

    if output.is_json() {
        return output.result(ListOutput { target_crs: MODERN_CRS, transformations: entries });
    }

    output.section("Supported Transformations");

    #[derive(Tabled)]
    struct EntryRow {
        #[tabled(rename = "Datum")]
        datum: String,
        #[tabled(rename = "Legacy CRS")]
        legacy_crs: String,
        #[tabled(rename = "Grid")]
        grid: String,
        #[tabled(rename = "File")]
        file: String,
    }

    let rows: Vec<EntryRow> = entries
        .iter()
        .map(|e| EntryRow {
            datum: e.datum_label.to_string(),
            legacy_crs: e.legacy_crs.clone(),
            grid: e.grid_label.to_string(),
            file: e.grid_file.to_string(),
        })
        .collect();

    output.table(rows);
    output.kv("Modern CRS", format!("{} ({})", MODERN_CRS, MODERN_CRS_NAME));

    Ok(())
}
