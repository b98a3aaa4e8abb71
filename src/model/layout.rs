//! Day layout pipeline: collision grouping, column packing, and geometry
//! projection for the calendar grid.
//!
//! Tasks that overlap in time on the same day are packed into side-by-side
//! columns so no two blocks ever paint over each other. All output geometry
//! is in percent of the day container; pixel concerns stay in the ui layer.

use std::collections::HashMap;

use chrono::NaiveDate;

use super::task::Task;

/// Minutes in a day; the fixed denominator of all vertical geometry.
pub const DAY_MINUTES: i64 = 24 * 60;
/// Shorter tasks are displayed at this length so they stay clickable.
pub const MIN_DISPLAY_MINUTES: i64 = 15;

/// Block geometry in percent of the day column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskLayout {
    pub top: f32,
    pub height: f32,
    pub left: f32,
    pub width: f32,
}

/// A task projected onto one day of the grid.
#[derive(Debug, Clone)]
pub struct ProcessedTask {
    pub task: Task,
    pub start_minutes: i64,
    pub end_minutes: i64,
    pub column: usize,
    pub total_columns: usize,
    pub layout: TaskLayout,
}

struct LayoutEvent {
    task: Task,
    start_minutes: i64,
    end_minutes: i64,
    column: usize,
    total_columns: usize,
}

/// Compute render geometry for every scheduled task on `day`.
///
/// Pure; safe to call on every frame. Tasks missing either endpoint or
/// starting on another day are excluded entirely.
pub fn compute_day_layout(tasks: &[Task], day: NaiveDate) -> Vec<ProcessedTask> {
    let mut events: Vec<LayoutEvent> = tasks
        .iter()
        .filter(|t| t.day() == Some(day) && t.end.is_some())
        .map(|t| {
            let start_minutes = t.start_minutes().unwrap_or(0);
            let end_minutes = start_minutes + t.duration_minutes().unwrap_or(0);
            LayoutEvent {
                task: t.clone(),
                start_minutes,
                end_minutes,
                column: 0,
                total_columns: 1,
            }
        })
        .collect();

    // Start ascending; ties broken by longer duration first so the dominant
    // task claims column 0 and the layout stays visually stable.
    events.sort_by(|a, b| {
        a.start_minutes.cmp(&b.start_minutes).then(
            (b.end_minutes - b.start_minutes).cmp(&(a.end_minutes - a.start_minutes)),
        )
    });

    for group in collision_groups(&mut events) {
        pack_columns(group);
    }

    events.into_iter().map(project).collect()
}

/// Single left-to-right sweep over sorted events. A new group opens exactly
/// when an event starts at or after the running max end of the current group;
/// boundary-equal endpoints do not collide.
fn collision_groups(events: &mut [LayoutEvent]) -> Vec<&mut [LayoutEvent]> {
    let mut boundaries = Vec::new();
    let mut group_start = 0;
    let mut max_end = i64::MIN;
    for (i, event) in events.iter().enumerate() {
        if i > 0 && event.start_minutes >= max_end {
            boundaries.push((group_start, i));
            group_start = i;
            max_end = event.end_minutes;
        } else {
            max_end = max_end.max(event.end_minutes);
        }
    }
    if !events.is_empty() {
        boundaries.push((group_start, events.len()));
    }

    let mut groups = Vec::with_capacity(boundaries.len());
    let mut rest = events;
    let mut consumed = 0;
    for (start, end) in boundaries {
        let (group, tail) = rest.split_at_mut(end - consumed);
        debug_assert_eq!(consumed, start);
        consumed = end;
        rest = tail;
        groups.push(group);
    }
    groups
}

/// Greedy earliest-free-column packing within one collision group.
///
/// Each event takes the lowest-index column whose last end time is at or
/// before the event's start, or opens a new column. Every member of the
/// group shares the final column count, even members that never touched the
/// busiest instant.
fn pack_columns(group: &mut [LayoutEvent]) {
    let mut column_ends: Vec<i64> = Vec::new();

    for event in group.iter_mut() {
        let slot = column_ends
            .iter()
            .position(|&end| end <= event.start_minutes);
        match slot {
            Some(i) => {
                column_ends[i] = event.end_minutes;
                event.column = i;
            }
            None => {
                event.column = column_ends.len();
                column_ends.push(event.end_minutes);
            }
        }
    }

    let total = column_ends.len();
    for event in group.iter_mut() {
        event.total_columns = total;
    }
}

fn project(event: LayoutEvent) -> ProcessedTask {
    let duration = (event.end_minutes - event.start_minutes).max(MIN_DISPLAY_MINUTES);
    let width = 100.0 / event.total_columns as f32;
    let layout = TaskLayout {
        top: event.start_minutes as f32 / DAY_MINUTES as f32 * 100.0,
        height: duration as f32 / DAY_MINUTES as f32 * 100.0,
        left: event.column as f32 * width,
        width,
    };
    ProcessedTask {
        task: event.task,
        start_minutes: event.start_minutes,
        end_minutes: event.end_minutes,
        column: event.column,
        total_columns: event.total_columns,
        layout,
    }
}

/// Memoizes `compute_day_layout` per day, invalidated by a task-list
/// revision counter the app bumps on every mutation.
#[derive(Default)]
pub struct LayoutCache {
    revision: u64,
    days: HashMap<NaiveDate, Vec<ProcessedTask>>,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layout_for(&mut self, tasks: &[Task], day: NaiveDate, revision: u64) -> &[ProcessedTask] {
        if self.revision != revision {
            self.days.clear();
            self.revision = revision;
        }
        self.days
            .entry(day)
            .or_insert_with(|| compute_day_layout(tasks, day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
    }

    fn task(title: &str, sh: u32, sm: u32, eh: u32, em: u32) -> Task {
        Task::new(title, at(sh, sm), at(eh, em))
    }

    fn by_title<'a>(layout: &'a [ProcessedTask], title: &str) -> &'a ProcessedTask {
        layout.iter().find(|p| p.task.title == title).unwrap()
    }

    #[test]
    fn empty_day_produces_no_blocks() {
        assert!(compute_day_layout(&[], day()).is_empty());
    }

    #[test]
    fn single_task_gets_full_width() {
        let layout = compute_day_layout(&[task("A", 10, 0, 11, 0)], day());
        assert_eq!(layout.len(), 1);
        let a = &layout[0];
        assert_eq!(a.total_columns, 1);
        assert_eq!(a.layout.left, 0.0);
        assert_eq!(a.layout.width, 100.0);
        assert!((a.layout.top - 600.0 / 1440.0 * 100.0).abs() < 1e-4);
        assert!((a.layout.height - 60.0 / 1440.0 * 100.0).abs() < 1e-4);
    }

    #[test]
    fn unscheduled_and_other_day_tasks_are_excluded() {
        let other_day = Task::new(
            "other",
            NaiveDate::from_ymd_opt(2024, 5, 7)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 7)
                .unwrap()
                .and_hms_opt(11, 0, 0)
                .unwrap(),
        );
        let tasks = vec![
            task("on-day", 9, 0, 10, 0),
            Task::unscheduled("inbox"),
            other_day,
        ];
        let layout = compute_day_layout(&tasks, day());
        assert_eq!(layout.len(), 1);
        assert_eq!(layout[0].task.title, "on-day");
    }

    // The three-task scenario: A 10:00-11:00, B 10:30-11:30, C 10:45-12:00
    // form one group with columns {A:0, B:1, C:2}; D 11:30-12:00 still joins
    // because its start is below the group's running max (12:00).
    #[test]
    fn overlap_scenario_packs_three_columns_and_d_joins() {
        let tasks = vec![
            task("B", 10, 30, 11, 30),
            task("C", 10, 45, 12, 0),
            task("A", 10, 0, 11, 0),
            task("D", 11, 30, 12, 0),
        ];
        let layout = compute_day_layout(&tasks, day());
        assert_eq!(layout.len(), 4);

        assert_eq!(by_title(&layout, "A").column, 0);
        assert_eq!(by_title(&layout, "B").column, 1);
        assert_eq!(by_title(&layout, "C").column, 2);
        // D reuses column 0: A (ends 11:00) is free by 11:30.
        assert_eq!(by_title(&layout, "D").column, 0);
        for p in &layout {
            assert_eq!(p.total_columns, 3);
        }
    }

    #[test]
    fn boundary_equal_tasks_form_separate_groups() {
        let tasks = vec![task("A", 9, 0, 10, 0), task("B", 10, 0, 11, 0)];
        let layout = compute_day_layout(&tasks, day());
        for p in &layout {
            assert_eq!(p.total_columns, 1);
            assert_eq!(p.layout.width, 100.0);
        }
    }

    #[test]
    fn longer_task_wins_start_tie_and_takes_column_zero() {
        let tasks = vec![task("short", 10, 0, 10, 30), task("long", 10, 0, 12, 0)];
        let layout = compute_day_layout(&tasks, day());
        assert_eq!(by_title(&layout, "long").column, 0);
        assert_eq!(by_title(&layout, "short").column, 1);
    }

    // Columns in a group never overlap horizontally.
    #[test]
    fn distinct_columns_never_overlap_horizontally() {
        let tasks = vec![
            task("A", 8, 0, 12, 0),
            task("B", 8, 30, 9, 30),
            task("C", 9, 0, 10, 0),
            task("D", 9, 45, 11, 0),
        ];
        let layout = compute_day_layout(&tasks, day());
        for a in &layout {
            for b in &layout {
                if a.task.id == b.task.id {
                    continue;
                }
                assert_eq!(a.total_columns, b.total_columns);
                if a.column != b.column {
                    let a_range = (a.layout.left, a.layout.left + a.layout.width);
                    let b_range = (b.layout.left, b.layout.left + b.layout.width);
                    assert!(a_range.1 <= b_range.0 + 1e-4 || b_range.1 <= a_range.0 + 1e-4);
                }
            }
        }
    }

    // Column count never exceeds the deepest instantaneous overlap.
    #[test]
    fn column_count_matches_peak_concurrency() {
        let tasks = vec![
            task("A", 8, 0, 9, 0),
            task("B", 8, 30, 10, 0),
            task("C", 9, 15, 10, 30),
            task("D", 9, 30, 11, 0),
        ];
        let layout = compute_day_layout(&tasks, day());
        let peak = (0..DAY_MINUTES)
            .map(|m| {
                layout
                    .iter()
                    .filter(|p| p.start_minutes <= m && m < p.end_minutes)
                    .count()
            })
            .max()
            .unwrap();
        let total = layout[0].total_columns;
        assert!(total <= peak, "packed {total} columns for peak overlap {peak}");
    }

    #[test]
    fn degenerate_duration_clamps_to_minimum_height() {
        let five_min = task("tiny", 10, 0, 10, 5);
        let fifteen_min = task("small", 12, 0, 12, 15);
        let layout = compute_day_layout(&[five_min, fifteen_min], day());
        let tiny = by_title(&layout, "tiny").layout.height;
        let small = by_title(&layout, "small").layout.height;
        assert!((tiny - small).abs() < 1e-6);
    }

    #[test]
    fn cache_recomputes_only_on_revision_change() {
        let mut cache = LayoutCache::new();
        let tasks = vec![task("A", 10, 0, 11, 0)];
        assert_eq!(cache.layout_for(&tasks, day(), 1).len(), 1);

        // Same revision: stale input is ignored, the memoized day wins.
        let more = vec![task("A", 10, 0, 11, 0), task("B", 10, 0, 11, 0)];
        assert_eq!(cache.layout_for(&more, day(), 1).len(), 1);

        // New revision invalidates.
        assert_eq!(cache.layout_for(&more, day(), 2).len(), 2);
    }
}
