use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};

use crate::model::task::{Task, TaskStatus};

/// Map a status string to a `TaskStatus`.
fn parse_status(status: &str) -> TaskStatus {
    match status.trim().to_lowercase().as_str() {
        "finished" | "done" | "complete" | "completed" => TaskStatus::Done,
        "in progress" | "in-progress" | "active" | "started" => TaskStatus::InProgress,
        _ => TaskStatus::NotStarted,
    }
}

/// Try parsing a datetime string with several common formats; bare dates
/// fall back to midnight.
fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    for fmt in &[
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%d/%m/%Y %H:%M",
        "%m/%d/%Y %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y", "%d.%m.%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Detect delimiter by checking the first line for common separators.
fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons >= commas && semicolons >= tabs {
        b';'
    } else if tabs >= commas {
        b'\t'
    } else {
        b','
    }
}

/// Normalize a header string to a canonical column key.
fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase().replace([' ', '-', '_'], "")
}

/// Map a normalized header to our column index:
///   0 = title, 1 = start, 2 = end, 3 = status, 4 = client,
///   5 = department, 6 = notes
fn header_to_col(normalized: &str) -> Option<usize> {
    match normalized {
        "title" | "task" | "name" | "taskname" | "label" | "activity" => Some(0),

        "start" | "startdate" | "starttime" | "from" | "begin" => Some(1),

        "end" | "enddate" | "endtime" | "to" | "finish" | "due" | "duedate" => Some(2),

        "status" | "state" | "progress" | "stage" => Some(3),

        "client" | "customer" | "account" => Some(4),

        "department" | "dept" | "team" => Some(5),

        "notes" | "note" | "description" | "details" | "comment" | "comments" => Some(6),

        _ => None,
    }
}

/// Import tasks from a CSV file.
///
/// Auto-detects delimiter (comma, semicolon, tab) and matches column headers
/// flexibly. Rows with an unparsable or empty start/end land in the inbox as
/// unscheduled tasks rather than being dropped. Returns `(tasks, skipped)`;
/// skipped counts rows with no usable title.
pub fn import_csv(path: &PathBuf) -> Result<(Vec<Task>, usize), String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;

    let first_line = content.lines().next().unwrap_or("");
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| format!("Failed to read CSV headers: {}", e))?
        .clone();

    let col_map: Vec<Option<usize>> = headers
        .iter()
        .map(|h| header_to_col(&normalize_header(h)))
        .collect();

    if !col_map.iter().any(|c| *c == Some(0)) {
        let found: Vec<&str> = headers.iter().collect();
        return Err(format!(
            "CSV is missing a title column. Found headers: {:?}.",
            found
        ));
    }

    let mut tasks: Vec<Task> = Vec::new();
    let mut skipped = 0usize;

    for (i, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Skipping CSV row {}: {}", i + 2, e);
                skipped += 1;
                continue;
            }
        };

        let mut fields: [Option<String>; 7] = Default::default();
        for (col_idx, field) in record.iter().enumerate() {
            if let Some(Some(slot)) = col_map.get(col_idx) {
                fields[*slot] = Some(field.trim().to_string());
            }
        }

        let title = match fields[0].take() {
            Some(t) if !t.is_empty() => t,
            _ => {
                skipped += 1;
                continue;
            }
        };

        let start = fields[1].as_deref().and_then(parse_datetime);
        let end = fields[2].as_deref().and_then(parse_datetime);

        // Only a fully specified, forward interval is schedulable.
        let mut task = match (start, end) {
            (Some(s), Some(e)) if e > s => Task::new(title, s, e),
            _ => Task::unscheduled(title),
        };

        task.status = fields[3].as_deref().map(parse_status).unwrap_or_default();
        task.client = fields[4].take().unwrap_or_default();
        task.department = fields[5].take().unwrap_or_default();
        task.notes = fields[6].take().unwrap_or_default();
        tasks.push(task);
    }

    if tasks.is_empty() {
        return Err("No importable rows found in CSV.".to_string());
    }

    Ok((tasks, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_normalize_to_canonical_columns() {
        assert_eq!(header_to_col(&normalize_header("Task Name")), Some(0));
        assert_eq!(header_to_col(&normalize_header("Start_Time")), Some(1));
        assert_eq!(header_to_col(&normalize_header("Due Date")), Some(2));
        assert_eq!(header_to_col(&normalize_header("STATUS")), Some(3));
        assert_eq!(header_to_col(&normalize_header("mystery")), None);
    }

    #[test]
    fn delimiter_detection_prefers_the_most_frequent() {
        assert_eq!(detect_delimiter("a;b;c"), b';');
        assert_eq!(detect_delimiter("a,b,c"), b',');
        assert_eq!(detect_delimiter("a\tb\tc"), b'\t');
    }

    #[test]
    fn status_strings_map_to_variants() {
        assert_eq!(parse_status("Done"), TaskStatus::Done);
        assert_eq!(parse_status("in progress"), TaskStatus::InProgress);
        assert_eq!(parse_status("whatever"), TaskStatus::NotStarted);
    }

    #[test]
    fn datetimes_parse_with_and_without_time() {
        let dt = parse_datetime("2024-05-06 09:30").unwrap();
        assert_eq!(dt.format("%H:%M").to_string(), "09:30");
        let midnight = parse_datetime("06/05/2024").unwrap();
        assert_eq!(midnight.format("%H:%M").to_string(), "00:00");
        assert!(parse_datetime("not a date").is_none());
    }
}
