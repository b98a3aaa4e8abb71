use chrono::{Datelike, Duration, NaiveDate, Timelike};

/// Window width below which the calendar collapses to a two-day view.
pub const NARROW_BREAKPOINT: f32 = 768.0;

/// How many days the calendar shows at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Day,
    Week,
}

impl DisplayMode {
    pub fn label(&self) -> &'static str {
        match self {
            DisplayMode::Day => "Day",
            DisplayMode::Week => "Week",
        }
    }
}

/// The days currently on screen. A narrow window always shows `anchor` and
/// the next day; otherwise Day mode shows one day and Week mode the Monday
/// through Sunday containing `anchor`.
pub fn visible_days(anchor: NaiveDate, mode: DisplayMode, narrow: bool) -> Vec<NaiveDate> {
    if narrow {
        return vec![anchor, anchor + Duration::days(1)];
    }
    match mode {
        DisplayMode::Day => vec![anchor],
        DisplayMode::Week => {
            let monday = anchor - Duration::days(anchor.weekday().num_days_from_monday() as i64);
            (0..7).map(|i| monday + Duration::days(i)).collect()
        }
    }
}

/// Step width for the prev/next navigation buttons.
pub fn navigation_step(mode: DisplayMode, narrow: bool) -> Duration {
    if narrow {
        Duration::days(2)
    } else {
        match mode {
            DisplayMode::Day => Duration::days(1),
            DisplayMode::Week => Duration::weeks(1),
        }
    }
}

/// Vertical position of the current-time line, as percent of the day.
pub fn current_time_top(now: chrono::NaiveTime) -> f32 {
    let minutes = now.hour() as f32 * 60.0 + now.minute() as f32;
    minutes / (24.0 * 60.0) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wednesday() -> NaiveDate {
        // 2024-05-08 is a Wednesday.
        NaiveDate::from_ymd_opt(2024, 5, 8).unwrap()
    }

    #[test]
    fn week_view_runs_monday_through_sunday() {
        let days = visible_days(wednesday(), DisplayMode::Week, false);
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2024, 5, 6).unwrap());
        assert_eq!(days[6], NaiveDate::from_ymd_opt(2024, 5, 12).unwrap());
        assert!(days.contains(&wednesday()));
    }

    #[test]
    fn day_view_shows_the_anchor_only() {
        assert_eq!(
            visible_days(wednesday(), DisplayMode::Day, false),
            vec![wednesday()]
        );
    }

    #[test]
    fn narrow_window_forces_two_days_in_any_mode() {
        for mode in [DisplayMode::Day, DisplayMode::Week] {
            let days = visible_days(wednesday(), mode, true);
            assert_eq!(days, vec![wednesday(), wednesday() + Duration::days(1)]);
        }
    }

    #[test]
    fn navigation_steps_match_the_visible_span() {
        assert_eq!(navigation_step(DisplayMode::Day, false), Duration::days(1));
        assert_eq!(navigation_step(DisplayMode::Week, false), Duration::weeks(1));
        assert_eq!(navigation_step(DisplayMode::Week, true), Duration::days(2));
    }

    #[test]
    fn current_time_top_is_a_day_fraction() {
        let noon = chrono::NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        assert!((current_time_top(noon) - 50.0).abs() < 1e-4);
    }
}
