//! Pointer gesture support for the calendar grid: time snapping, pixel to
//! time/day inverse mapping, and the drag/resize state machine.
//!
//! All of this is pure math over the grid's bounding geometry; the ui layer
//! feeds it pointer positions and commits the resulting task updates.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use uuid::Uuid;

use super::layout::DAY_MINUTES;
use super::task::Task;

/// Drop and resize times snap to this granularity.
pub const SNAP_MINUTES: i64 = 15;
/// Tasks scheduled from the inbox get this duration.
pub const DEFAULT_DROP_DURATION: i64 = 60;

/// The single active pointer gesture. At most one variant is live at a time;
/// every terminal event resets to `Idle` whether or not a commit happened.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    /// Moving a block, or scheduling one out of the inbox.
    Dragging {
        task_id: Uuid,
        /// Pointer offset from the block's top edge at drag start; zero for
        /// inbox drags, which have no block on the grid yet.
        grab_offset_y: f32,
    },
    /// Stretching a block's end from the bottom handle. The draft end is
    /// rendered live but not committed until release.
    Resizing {
        task_id: Uuid,
        draft_end: NaiveDateTime,
    },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    pub fn clear(&mut self) {
        *self = Gesture::Idle;
    }

    pub fn is_resizing(&self, id: Uuid) -> bool {
        matches!(self, Gesture::Resizing { task_id, .. } if *task_id == id)
    }

    /// Draft end time for a block being resized, if it is this one.
    pub fn draft_end_for(&self, id: Uuid) -> Option<NaiveDateTime> {
        match self {
            Gesture::Resizing { task_id, draft_end } if *task_id == id => Some(*draft_end),
            _ => None,
        }
    }
}

/// Round to the nearest snap boundary, clamped into the day.
pub fn snap(minutes: f32) -> i64 {
    let snapped = (minutes / SNAP_MINUTES as f32).round() as i64 * SNAP_MINUTES;
    snapped.clamp(0, DAY_MINUTES)
}

/// Vertical pixel offset within the grid to raw minutes of day.
pub fn minutes_at(y: f32, grid_height: f32) -> f32 {
    y / grid_height * DAY_MINUTES as f32
}

/// Horizontal pixel offset to a visible-day index, clamped to the edge
/// columns so a wild drop still lands somewhere valid.
pub fn day_index_at(x: f32, grid_width: f32, day_count: usize) -> usize {
    if day_count == 0 {
        return 0;
    }
    let day_width = grid_width / day_count as f32;
    let index = (x / day_width).floor() as isize;
    index.clamp(0, day_count as isize - 1) as usize
}

/// Instant at `minutes` past midnight on `day`.
pub fn time_on(day: NaiveDate, minutes: i64) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN) + Duration::minutes(minutes)
}

/// Resolve a completed drop into an updated task.
///
/// `drop_y` is relative to the grid top; `grab_offset_y` realigns the
/// grabbed point with the block top for grid-sourced drags. Previously
/// scheduled tasks keep their duration; inbox tasks get the default.
pub fn drop_schedule(
    task: &Task,
    day: NaiveDate,
    drop_y: f32,
    grab_offset_y: f32,
    grid_height: f32,
) -> Task {
    let top_y = drop_y - grab_offset_y;
    let start_minutes = snap(minutes_at(top_y, grid_height).max(0.0));
    let duration = task.duration_minutes().unwrap_or(DEFAULT_DROP_DURATION);

    let start = time_on(day, start_minutes);
    let mut updated = task.clone();
    updated.start = Some(start);
    updated.end = Some(start + Duration::minutes(duration));
    updated
}

/// Candidate end time while resizing. Snapped like drops; candidates at or
/// before the start are rejected so a block can never invert.
pub fn resize_candidate(
    start: NaiveDateTime,
    pointer_y: f32,
    grid_height: f32,
) -> Option<NaiveDateTime> {
    let snapped = snap(minutes_at(pointer_y, grid_height));
    let start_minutes = start.time().hour() as i64 * 60 + start.time().minute() as i64;
    if snapped > start_minutes {
        Some(time_on(start.date(), snapped))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
    }

    #[test]
    fn snap_is_idempotent() {
        for m in [0.0, 15.0, 450.0, 1440.0] {
            assert_eq!(snap(m), m as i64);
        }
        for m in [7.0, 8.0, 222.2, 1433.0] {
            let once = snap(m);
            assert_eq!(snap(once as f32), once);
        }
    }

    #[test]
    fn snap_rounds_to_nearest_quarter_hour() {
        assert_eq!(snap(7.0), 0);
        assert_eq!(snap(8.0), 15);
        assert_eq!(snap(52.0), 45);
        assert_eq!(snap(53.0), 60);
    }

    #[test]
    fn snap_clamps_into_the_day() {
        assert_eq!(snap(-30.0), 0);
        assert_eq!(snap(2000.0), DAY_MINUTES);
    }

    // A drop at half the grid height lands at noon when the height
    // divides evenly, and on the nearest quarter hour otherwise.
    #[test]
    fn drop_at_half_height_is_noon() {
        assert_eq!(snap(minutes_at(480.0, 960.0)), 720);
    }

    #[test]
    fn drop_on_uneven_height_hits_nearest_boundary() {
        let minutes = minutes_at(333.0, 1000.0); // 479.52
        assert_eq!(snap(minutes), 480);
    }

    #[test]
    fn day_index_clamps_to_edge_columns() {
        assert_eq!(day_index_at(-10.0, 700.0, 7), 0);
        assert_eq!(day_index_at(350.0, 700.0, 7), 3);
        assert_eq!(day_index_at(9999.0, 700.0, 7), 6);
    }

    #[test]
    fn drop_preserves_duration_and_subtracts_grab_offset() {
        let task = Task::new("Call", at(9, 0), at(10, 30));
        // Grabbed 40px below the top; grid maps 1px to 1 minute.
        let updated = drop_schedule(&task, day(), 640.0, 40.0, 1440.0);
        assert_eq!(updated.start, Some(at(10, 0)));
        assert_eq!(updated.end, Some(at(11, 30)));
    }

    #[test]
    fn inbox_drop_uses_drop_point_and_default_duration() {
        let task = Task::unscheduled("Triage");
        let updated = drop_schedule(&task, day(), 600.0, 0.0, 1440.0);
        assert_eq!(updated.start, Some(at(10, 0)));
        assert_eq!(updated.end, Some(at(11, 0)));
    }

    #[test]
    fn drop_above_the_grid_clamps_to_midnight() {
        let task = Task::new("Early", at(9, 0), at(9, 30));
        let updated = drop_schedule(&task, day(), 10.0, 300.0, 1440.0);
        assert_eq!(updated.start.unwrap().time().hour(), 0);
        assert_eq!(updated.start.unwrap().time().minute(), 0);
    }

    #[test]
    fn resize_rejects_candidates_at_or_before_start() {
        let start = at(10, 0);
        // 600 minutes = 10:00 exactly, not strictly after.
        assert_eq!(resize_candidate(start, 600.0, 1440.0), None);
        assert_eq!(resize_candidate(start, 400.0, 1440.0), None);
    }

    #[test]
    fn resize_accepts_snapped_later_candidates() {
        let start = at(10, 0);
        let end = resize_candidate(start, 669.0, 1440.0).unwrap(); // 11:09 -> 11:15
        assert_eq!(end, at(11, 15));
    }

    #[test]
    fn gesture_resets_to_idle() {
        let mut gesture = Gesture::Resizing {
            task_id: Uuid::new_v4(),
            draft_end: at(11, 0),
        };
        gesture.clear();
        assert!(gesture.is_idle());
    }

    #[test]
    fn draft_end_only_matches_the_resized_task() {
        let id = Uuid::new_v4();
        let gesture = Gesture::Resizing {
            task_id: id,
            draft_end: at(11, 0),
        };
        assert_eq!(gesture.draft_end_for(id), Some(at(11, 0)));
        assert_eq!(gesture.draft_end_for(Uuid::new_v4()), None);
    }
}
