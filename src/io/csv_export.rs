use std::path::Path;

use chrono::NaiveDateTime;

use crate::model::Task;

fn format_datetime(dt: Option<NaiveDateTime>) -> String {
    dt.map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

/// Export tasks to a semicolon-delimited CSV file matching the import format.
///
/// Columns: Title ; Start ; End ; Status ; Client ; Department ; Notes
/// Unscheduled tasks get empty start/end cells. Returns the number of tasks
/// written.
pub fn export_csv(tasks: &[Task], path: &Path) -> Result<usize, String> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(path)
        .map_err(|e| format!("Failed to create CSV file: {}", e))?;

    wtr.write_record(["Title", "Start", "End", "Status", "Client", "Department", "Notes"])
        .map_err(|e| format!("Failed to write header: {}", e))?;

    for task in tasks {
        wtr.write_record([
            task.title.as_str(),
            &format_datetime(task.start),
            &format_datetime(task.end),
            task.status.label(),
            task.client.as_str(),
            task.department.as_str(),
            task.notes.as_str(),
        ])
        .map_err(|e| format!("Failed to write task '{}': {}", task.title, e))?;
    }

    wtr.flush().map_err(|e| format!("Failed to flush CSV: {}", e))?;
    Ok(tasks.len())
}
