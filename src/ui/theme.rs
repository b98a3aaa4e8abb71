use egui::{Color32, FontId, Rounding, Stroke, Visuals};

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(24, 24, 32);
pub const BG_PANEL: Color32 = Color32::from_rgb(30, 30, 40);
pub const BG_HEADER: Color32 = Color32::from_rgb(34, 37, 48);
pub const BG_FIELD: Color32 = Color32::from_rgb(20, 20, 28);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(50, 52, 64);
pub const BORDER_ACCENT: Color32 = Color32::from_rgb(150, 120, 230);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(230, 232, 240);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(155, 160, 178);
pub const TEXT_DIM: Color32 = Color32::from_rgb(100, 105, 120);

pub const ACCENT: Color32 = Color32::from_rgb(130, 100, 220);
pub const ACCENT_FILL: Color32 = Color32::from_rgba_premultiplied(70, 55, 120, 110);
pub const NOW_LINE: Color32 = Color32::from_rgb(240, 75, 75);
pub const GRID_LINE: Color32 = Color32::from_rgb(44, 46, 58);
pub const HANDLE_COLOR: Color32 = Color32::from_rgb(255, 255, 255);

pub const STATUS_DONE: Color32 = Color32::from_rgb(74, 222, 128);
pub const STATUS_IN_PROGRESS: Color32 = Color32::from_rgb(96, 165, 250);
pub const STATUS_NOT_STARTED: Color32 = Color32::from_rgb(120, 125, 140);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const HOUR_HEIGHT: f32 = 56.0;
pub const TIME_GUTTER_WIDTH: f32 = 56.0;
pub const DAY_HEADER_HEIGHT: f32 = 48.0;
/// Horizontal gap between packed columns, taken off each block at paint time.
pub const COLUMN_GUTTER: f32 = 4.0;
/// Grab region at the bottom edge of a block used for resizing.
pub const RESIZE_HANDLE_HEIGHT: f32 = 7.0;
pub const BLOCK_ROUNDING: f32 = 5.0;
pub const PARTICIPANT_STRIP_WIDTH: f32 = 4.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_day_number() -> FontId {
    FontId::proportional(18.0)
}

pub fn font_block() -> FontId {
    FontId::proportional(11.5)
}

pub fn font_small() -> FontId {
    FontId::proportional(9.5)
}

pub fn font_menu() -> FontId {
    FontId::proportional(12.5)
}

pub fn font_status() -> FontId {
    FontId::proportional(11.0)
}

// ── Participant color palette ────────────────────────────────────────────────

pub const PARTICIPANT_COLORS: &[Color32] = &[
    Color32::from_rgb(251, 113, 133), // Rose
    Color32::from_rgb(232, 121, 249), // Fuchsia
    Color32::from_rgb(129, 140, 248), // Indigo
    Color32::from_rgb(96, 165, 250),  // Blue
    Color32::from_rgb(45, 212, 191),  // Teal
    Color32::from_rgb(74, 222, 128),  // Green
    Color32::from_rgb(250, 204, 21),  // Yellow
    Color32::from_rgb(251, 146, 60),  // Orange
];

pub fn participant_color(index: usize) -> Color32 {
    PARTICIPANT_COLORS[index % PARTICIPANT_COLORS.len()]
}

pub fn status_color(status: crate::model::TaskStatus) -> Color32 {
    use crate::model::TaskStatus;
    match status {
        TaskStatus::Done => STATUS_DONE,
        TaskStatus::InProgress => STATUS_IN_PROGRESS,
        TaskStatus::NotStarted => STATUS_NOT_STARTED,
    }
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = BG_FIELD;

    visuals.widgets.noninteractive.bg_fill = BG_PANEL;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);
    visuals.widgets.noninteractive.rounding = Rounding::same(4.0);

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(42, 44, 56);
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.inactive.rounding = Rounding::same(4.0);

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(52, 54, 68);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.hovered.rounding = Rounding::same(4.0);

    visuals.widgets.active.bg_fill = Color32::from_rgb(60, 62, 76);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.active.fg_stroke = Stroke::new(2.0, Color32::WHITE);
    visuals.widgets.active.rounding = Rounding::same(4.0);

    visuals.widgets.open.bg_fill = Color32::from_rgb(50, 52, 66);
    visuals.widgets.open.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.open.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.open.rounding = Rounding::same(4.0);

    visuals.selection.bg_fill = ACCENT_FILL;
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    ctx.set_visuals(visuals);
}
