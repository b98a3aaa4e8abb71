use chrono::{Datelike, NaiveDate};
use egui::{Align2, CursorIcon, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use uuid::Uuid;

use crate::model::{calendar, layout, schedule, Gesture, LayoutCache, Participant, Task};
use crate::ui::theme;

const HOUR_HEIGHT: f32 = theme::HOUR_HEIGHT;
const GUTTER_WIDTH: f32 = theme::TIME_GUTTER_WIDTH;
const HANDLE_HEIGHT: f32 = theme::RESIZE_HANDLE_HEIGHT;

/// Result details from interactions in the calendar grid.
#[derive(Default)]
pub struct GridInteraction {
    /// A finished drag, drop, or resize produced a new task record. At most
    /// one per frame; the caller routes it into history-aware storage.
    pub updated_task: Option<Task>,
}

/// Render the day/week grid: hour rows, one column per visible day, and the
/// packed task blocks from the layout cache.
#[allow(clippy::too_many_arguments)]
pub fn show_calendar_grid(
    tasks: &[Task],
    layout_cache: &mut LayoutCache,
    revision: u64,
    days: &[NaiveDate],
    participants: &[Participant],
    gesture: &mut Gesture,
    selected_task: &mut Option<Uuid>,
    scroll_to_now: bool,
    ui: &mut Ui,
) -> GridInteraction {
    let mut interaction = GridInteraction::default();
    if days.is_empty() {
        return interaction;
    }

    let today = chrono::Local::now().date_naive();
    let now = chrono::Local::now().time();

    draw_day_headers(ui, days, today);

    let canvas_height = 24.0 * HOUR_HEIGHT;
    let mut scroll = egui::ScrollArea::vertical().auto_shrink([false, false]);
    if scroll_to_now {
        let now_y = calendar::current_time_top(now) / 100.0 * canvas_height;
        scroll = scroll.vertical_scroll_offset((now_y - 200.0).max(0.0));
    }

    scroll.show(ui, |ui| {
        let (response, painter) = ui.allocate_painter(
            Vec2::new(ui.available_width(), canvas_height),
            Sense::click(),
        );
        let canvas = response.rect;
        let grid = Rect::from_min_max(
            Pos2::new(canvas.left() + GUTTER_WIDTH, canvas.top()),
            canvas.max,
        );
        let day_width = grid.width() / days.len() as f32;
        let mut consumed_click = false;

        painter.rect_filled(canvas, 0.0, theme::BG_DARK);
        draw_hour_rows(&painter, canvas, grid);

        for i in 1..days.len() {
            let x = grid.left() + i as f32 * day_width;
            painter.line_segment(
                [Pos2::new(x, grid.top()), Pos2::new(x, grid.bottom())],
                Stroke::new(0.5, theme::GRID_LINE),
            );
        }

        // Highlight the day column an inbox task would land in.
        if response.dnd_hover_payload::<Uuid>().is_some() {
            if let Some(pointer) = ui.input(|i| i.pointer.interact_pos()) {
                let idx = schedule::day_index_at(pointer.x - grid.left(), grid.width(), days.len());
                let col = Rect::from_min_size(
                    Pos2::new(grid.left() + idx as f32 * day_width, grid.top()),
                    Vec2::new(day_width, grid.height()),
                );
                painter.rect_filled(col, 0.0, theme::ACCENT.gamma_multiply(0.08));
            }
        }

        for (day_idx, day) in days.iter().enumerate() {
            let day_left = grid.left() + day_idx as f32 * day_width;
            let blocks = layout_cache.layout_for(tasks, *day, revision);

            for block in blocks {
                let task_id = block.task.id;
                let is_resizing = gesture.is_resizing(task_id);

                // A live resize draft overrides the committed height for
                // this one block; everything else keeps its layout.
                let height_minutes = match (gesture.draft_end_for(task_id), block.task.start) {
                    (Some(draft), Some(start)) => (draft - start).num_minutes().max(1) as f32,
                    _ => (block.end_minutes - block.start_minutes)
                        .max(layout::MIN_DISPLAY_MINUTES) as f32,
                };

                let block_rect = Rect::from_min_size(
                    Pos2::new(
                        day_left + block.layout.left / 100.0 * day_width,
                        grid.top() + block.layout.top / 100.0 * grid.height(),
                    ),
                    Vec2::new(
                        (block.layout.width / 100.0 * day_width - theme::COLUMN_GUTTER).max(6.0),
                        height_minutes / layout::DAY_MINUTES as f32 * grid.height(),
                    ),
                );

                let is_selected = *selected_task == Some(task_id);
                draw_task_block(
                    &painter,
                    block_rect,
                    block,
                    participants,
                    is_selected,
                    is_resizing,
                    gesture.draft_end_for(task_id),
                );

                let block_response = ui.interact(
                    block_rect,
                    ui.make_persistent_id(("task-block", task_id)),
                    Sense::click_and_drag(),
                );
                let handle_rect = Rect::from_min_max(
                    Pos2::new(block_rect.left(), block_rect.bottom() - HANDLE_HEIGHT),
                    block_rect.max,
                );
                let handle_response = ui.interact(
                    handle_rect,
                    ui.make_persistent_id(("task-resize", task_id)),
                    Sense::drag(),
                );

                if block_response.clicked() {
                    *selected_task = Some(task_id);
                    consumed_click = true;
                }

                // Resizing claims the gesture first; an active resize keeps
                // the block undraggable for its whole duration.
                if handle_response.drag_started() && gesture.is_idle() {
                    if let Some(end) = block.task.end {
                        *gesture = Gesture::Resizing {
                            task_id,
                            draft_end: end,
                        };
                        *selected_task = Some(task_id);
                    }
                }

                if gesture.is_resizing(task_id) {
                    ui.ctx().set_cursor_icon(CursorIcon::ResizeVertical);
                    if handle_response.dragged() {
                        if let (Some(pointer), Some(start)) =
                            (handle_response.interact_pointer_pos(), block.task.start)
                        {
                            let candidate = schedule::resize_candidate(
                                start,
                                pointer.y - grid.top(),
                                grid.height(),
                            );
                            if let Some(draft_end) = candidate {
                                *gesture = Gesture::Resizing { task_id, draft_end };
                            }
                        }
                    }
                    if handle_response.drag_stopped() {
                        if let Some(draft) = gesture.draft_end_for(task_id) {
                            if Some(draft) != block.task.end {
                                let mut updated = block.task.clone();
                                updated.end = Some(draft);
                                interaction.updated_task = Some(updated);
                            }
                        }
                        gesture.clear();
                    }
                } else if !is_resizing {
                    if block_response.drag_started() && gesture.is_idle() {
                        let grab_offset_y = block_response
                            .interact_pointer_pos()
                            .map(|p| p.y - block_rect.top())
                            .unwrap_or(0.0);
                        *gesture = Gesture::Dragging {
                            task_id,
                            grab_offset_y,
                        };
                        *selected_task = Some(task_id);
                    }

                    if block_response.dragged() {
                        ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
                    }

                    if block_response.drag_stopped() {
                        if let Gesture::Dragging {
                            task_id: dragged,
                            grab_offset_y,
                            ..
                        } = *gesture
                        {
                            if dragged == task_id {
                                if let Some(pointer) = block_response.interact_pointer_pos() {
                                    let idx = schedule::day_index_at(
                                        pointer.x - grid.left(),
                                        grid.width(),
                                        days.len(),
                                    );
                                    interaction.updated_task = Some(schedule::drop_schedule(
                                        &block.task,
                                        days[idx],
                                        pointer.y - grid.top(),
                                        grab_offset_y,
                                        grid.height(),
                                    ));
                                }
                            }
                        }
                        gesture.clear();
                    }
                }

                if handle_response.hovered() || is_resizing {
                    ui.ctx().set_cursor_icon(CursorIcon::ResizeVertical);
                    let pill = Rect::from_center_size(
                        Pos2::new(block_rect.center().x, block_rect.bottom() - 3.0),
                        Vec2::new(24.0, 3.0),
                    );
                    painter.rect_filled(pill, Rounding::same(1.5), theme::HANDLE_COLOR);
                }
            }
        }

        // Snap preview while a drag is in flight over the grid.
        if let Gesture::Dragging { grab_offset_y, .. } = *gesture {
            if let Some(pointer) = ui.input(|i| i.pointer.interact_pos()) {
                if grid.contains(pointer) {
                    draw_snap_preview(&painter, grid, days.len(), pointer, grab_offset_y);
                }
            }
        }

        // Drop of an inbox task released over the grid.
        if let Some(payload) = response.dnd_release_payload::<Uuid>() {
            let dropped_id = *payload;
            if let Some(pointer) = ui.input(|i| i.pointer.interact_pos()) {
                if let Some(task) = tasks.iter().find(|t| t.id == dropped_id) {
                    if !task.is_scheduled() {
                        let idx = schedule::day_index_at(
                            pointer.x - grid.left(),
                            grid.width(),
                            days.len(),
                        );
                        interaction.updated_task = Some(schedule::drop_schedule(
                            task,
                            days[idx],
                            pointer.y - grid.top(),
                            0.0,
                            grid.height(),
                        ));
                        *selected_task = Some(dropped_id);
                    }
                }
            }
            gesture.clear();
        }

        if let Some(today_idx) = days.iter().position(|d| *d == today) {
            draw_now_line(&painter, canvas, grid, day_width, today_idx, now);
        }

        // Empty click on background clears selection
        if response.clicked() && !consumed_click {
            *selected_task = None;
        }
    });

    interaction
}

fn draw_day_headers(ui: &mut Ui, days: &[NaiveDate], today: NaiveDate) {
    let (_, rect) = ui.allocate_space(Vec2::new(
        ui.available_width(),
        theme::DAY_HEADER_HEIGHT,
    ));
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, theme::BG_HEADER);
    painter.line_segment(
        [rect.left_bottom(), rect.right_bottom()],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    let day_width = (rect.width() - GUTTER_WIDTH) / days.len() as f32;
    for (i, day) in days.iter().enumerate() {
        let center_x = rect.left() + GUTTER_WIDTH + (i as f32 + 0.5) * day_width;
        let color = if *day == today {
            theme::ACCENT
        } else {
            theme::TEXT_PRIMARY
        };
        painter.text(
            Pos2::new(center_x, rect.top() + 12.0),
            Align2::CENTER_CENTER,
            day.format("%a").to_string(),
            theme::font_small(),
            theme::TEXT_DIM,
        );
        painter.text(
            Pos2::new(center_x, rect.top() + 32.0),
            Align2::CENTER_CENTER,
            day.day().to_string(),
            theme::font_day_number(),
            color,
        );
    }
}

fn draw_hour_rows(painter: &egui::Painter, canvas: Rect, grid: Rect) {
    painter.line_segment(
        [
            Pos2::new(grid.left(), canvas.top()),
            Pos2::new(grid.left(), canvas.bottom()),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );
    for hour in 0..24 {
        let y = canvas.top() + hour as f32 * HOUR_HEIGHT;
        painter.line_segment(
            [Pos2::new(grid.left(), y), Pos2::new(grid.right(), y)],
            Stroke::new(0.5, theme::GRID_LINE),
        );
        if hour > 0 {
            painter.text(
                Pos2::new(grid.left() - 6.0, y),
                Align2::RIGHT_CENTER,
                format!("{hour}:00"),
                theme::font_small(),
                theme::TEXT_DIM,
            );
        }
    }
}

fn draw_now_line(
    painter: &egui::Painter,
    canvas: Rect,
    grid: Rect,
    day_width: f32,
    today_idx: usize,
    now: chrono::NaiveTime,
) {
    let y = grid.top() + calendar::current_time_top(now) / 100.0 * grid.height();
    painter.line_segment(
        [Pos2::new(grid.left(), y), Pos2::new(grid.right(), y)],
        Stroke::new(1.0, theme::NOW_LINE.gamma_multiply(0.5)),
    );
    let x = grid.left() + today_idx as f32 * day_width;
    painter.line_segment(
        [Pos2::new(x, y), Pos2::new(x + day_width, y)],
        Stroke::new(1.5, theme::NOW_LINE),
    );

    // Time bubble in the gutter
    let label_rect = Rect::from_center_size(
        Pos2::new(canvas.left() + GUTTER_WIDTH / 2.0, y),
        Vec2::new(40.0, 16.0),
    );
    painter.rect_filled(label_rect, Rounding::same(3.0), theme::NOW_LINE);
    painter.text(
        label_rect.center(),
        Align2::CENTER_CENTER,
        now.format("%H:%M").to_string(),
        theme::font_small(),
        egui::Color32::WHITE,
    );
}

fn draw_snap_preview(
    painter: &egui::Painter,
    grid: Rect,
    day_count: usize,
    pointer: Pos2,
    grab_offset_y: f32,
) {
    let minutes = schedule::snap(
        schedule::minutes_at(pointer.y - grab_offset_y - grid.top(), grid.height()).max(0.0),
    );
    let day_width = grid.width() / day_count as f32;
    let idx = schedule::day_index_at(pointer.x - grid.left(), grid.width(), day_count);
    let x = grid.left() + idx as f32 * day_width;
    let y = grid.top() + minutes as f32 / layout::DAY_MINUTES as f32 * grid.height();

    painter.line_segment(
        [Pos2::new(x, y), Pos2::new(x + day_width, y)],
        Stroke::new(1.5, theme::ACCENT),
    );
    painter.text(
        Pos2::new(x + 4.0, y - 10.0),
        Align2::LEFT_CENTER,
        format!("{:02}:{:02}", minutes / 60, minutes % 60),
        theme::font_small(),
        theme::ACCENT,
    );
}

fn draw_task_block(
    painter: &egui::Painter,
    rect: Rect,
    block: &crate::model::ProcessedTask,
    participants: &[Participant],
    is_selected: bool,
    is_resizing: bool,
    draft_end: Option<chrono::NaiveDateTime>,
) {
    let rounding = Rounding::same(theme::BLOCK_ROUNDING);
    let fill = if is_selected {
        theme::ACCENT.gamma_multiply(0.85)
    } else {
        theme::ACCENT_FILL
    };
    painter.rect_filled(rect, rounding, fill);
    painter.rect_stroke(
        rect,
        rounding,
        Stroke::new(
            if is_selected || is_resizing { 1.5 } else { 1.0 },
            if is_resizing {
                theme::HANDLE_COLOR
            } else {
                theme::BORDER_ACCENT
            },
        ),
    );

    let mut text_left = rect.left() + 6.0;

    // Multi-participant tasks get a stacked color strip on the left edge.
    if block.task.participant_ids.len() > 1 {
        let strip = Rect::from_min_size(
            Pos2::new(rect.left() + 3.0, rect.top() + 3.0),
            Vec2::new(theme::PARTICIPANT_STRIP_WIDTH, rect.height() - 6.0),
        );
        let segment = strip.height() / block.task.participant_ids.len() as f32;
        for (i, pid) in block.task.participant_ids.iter().enumerate() {
            let color = participants
                .iter()
                .find(|p| p.id == *pid)
                .map(|p| p.color)
                .unwrap_or(theme::TEXT_DIM);
            let seg_rect = Rect::from_min_size(
                Pos2::new(strip.left(), strip.top() + i as f32 * segment),
                Vec2::new(strip.width(), segment.max(2.0)),
            );
            painter.rect_filled(seg_rect, 0.0, color);
        }
        text_left += theme::PARTICIPANT_STRIP_WIDTH + 4.0;
    }

    let clipped = painter.with_clip_rect(rect.shrink(2.0));

    // Status dot + title
    clipped.circle_filled(
        Pos2::new(text_left + 3.0, rect.top() + 10.0),
        3.0,
        theme::status_color(block.task.status),
    );
    clipped.text(
        Pos2::new(text_left + 10.0, rect.top() + 10.0),
        Align2::LEFT_CENTER,
        &block.task.title,
        theme::font_block(),
        theme::TEXT_PRIMARY,
    );

    // Time range, when there is room for a second line. The resize draft is
    // reflected live here too.
    if rect.height() > 30.0 {
        if let (Some(start), Some(end)) = (block.task.start, draft_end.or(block.task.end)) {
            clipped.text(
                Pos2::new(text_left + 10.0, rect.top() + 24.0),
                Align2::LEFT_CENTER,
                format!(
                    "{} - {}",
                    start.format("%H:%M"),
                    end.format("%H:%M")
                ),
                theme::font_small(),
                theme::TEXT_SECONDARY,
            );
        }
    }
}
