use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Completion state of a task. Affects rendering, never layout math.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    NotStarted,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn all() -> &'static [TaskStatus] {
        &[
            TaskStatus::NotStarted,
            TaskStatus::InProgress,
            TaskStatus::Done,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "Not Started",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }
}

/// A single task. Unscheduled tasks (no start) live in the inbox;
/// scheduled tasks carry both endpoints and appear on the calendar grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub status: TaskStatus,
    /// Ordered; drives the multi-participant color strip on a block.
    pub participant_ids: Vec<Uuid>,
    pub client: String,
    pub department: String,
    pub notes: String,
}

impl Task {
    /// Create a scheduled task.
    pub fn new(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            start: Some(start),
            end: Some(end),
            status: TaskStatus::NotStarted,
            participant_ids: Vec::new(),
            client: String::new(),
            department: String::new(),
            notes: String::new(),
        }
    }

    /// Create an inbox task with no time slot.
    pub fn unscheduled(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            start: None,
            end: None,
            status: TaskStatus::NotStarted,
            participant_ids: Vec::new(),
            client: String::new(),
            department: String::new(),
            notes: String::new(),
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.start.is_some()
    }

    /// Calendar day this task is rendered on, if any.
    pub fn day(&self) -> Option<NaiveDate> {
        self.start.map(|s| s.date())
    }

    /// Minutes since local midnight of `start`.
    pub fn start_minutes(&self) -> Option<i64> {
        self.start
            .map(|s| s.time().hour() as i64 * 60 + s.time().minute() as i64)
    }

    /// Duration in minutes, when both endpoints are present.
    pub fn duration_minutes(&self) -> Option<i64> {
        match (self.start, self.end) {
            (Some(s), Some(e)) => Some((e - s).num_minutes()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn scheduled_task_reports_day_and_minutes() {
        let task = Task::new("Standup", at(9, 15), at(9, 45));
        assert!(task.is_scheduled());
        assert_eq!(task.day(), NaiveDate::from_ymd_opt(2024, 5, 6));
        assert_eq!(task.start_minutes(), Some(9 * 60 + 15));
        assert_eq!(task.duration_minutes(), Some(30));
    }

    #[test]
    fn unscheduled_task_has_no_temporal_fields() {
        let task = Task::unscheduled("Write proposal");
        assert!(!task.is_scheduled());
        assert_eq!(task.day(), None);
        assert_eq!(task.start_minutes(), None);
        assert_eq!(task.duration_minutes(), None);
    }
}
