use egui::{CursorIcon, RichText, Ui};
use uuid::Uuid;

use crate::model::{Gesture, Participant, Task};
use crate::ui::theme;

/// Render the inbox: every unscheduled task, draggable onto the grid.
pub fn show_inbox(
    tasks: &[Task],
    participants: &[Participant],
    gesture: &mut Gesture,
    selected_task: &mut Option<Uuid>,
    ui: &mut Ui,
) {
    let inbox: Vec<&Task> = tasks.iter().filter(|t| !t.is_scheduled()).collect();

    ui.horizontal(|ui| {
        ui.label(
            RichText::new(format!("{} Inbox", egui_phosphor::regular::TRAY))
                .strong()
                .size(13.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                RichText::new(format!("{} unscheduled", inbox.len()))
                    .size(10.5)
                    .color(theme::TEXT_DIM),
            );
        });
    });
    ui.add_space(4.0);

    if inbox.is_empty() {
        ui.label(
            RichText::new("All caught up! Drag tasks here to unschedule them.")
                .size(10.5)
                .color(theme::TEXT_DIM),
        );
        return;
    }

    for task in inbox {
        let task_id = task.id;
        let drag_id = ui.make_persistent_id(("inbox-task", task_id));

        let response = ui
            .dnd_drag_source(drag_id, task_id, |ui| {
                egui::Frame::default()
                    .fill(theme::BG_DARK)
                    .rounding(egui::Rounding::same(4.0))
                    .stroke(egui::Stroke::new(1.0, theme::BORDER_SUBTLE))
                    .inner_margin(egui::Margin::same(6.0))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.horizontal(|ui| {
                            ui.label(
                                RichText::new(egui_phosphor::regular::DOTS_SIX_VERTICAL)
                                    .color(theme::TEXT_DIM),
                            );
                            ui.vertical(|ui| {
                                ui.label(
                                    RichText::new(&task.title)
                                        .size(11.5)
                                        .color(theme::TEXT_PRIMARY),
                                );
                                let detail = inbox_detail_line(task, participants);
                                if !detail.is_empty() {
                                    ui.label(
                                        RichText::new(detail).size(9.5).color(theme::TEXT_DIM),
                                    );
                                }
                            });
                        });
                    });
            })
            .response;

        if response.hovered() {
            ui.ctx().set_cursor_icon(CursorIcon::Grab);
        }
        if response.clicked() {
            *selected_task = Some(task_id);
        }
        // Entering a cross-view drag claims the gesture; the grid clears it
        // on release, and the app clears it if the drop lands nowhere.
        if response.drag_started() && gesture.is_idle() {
            *selected_task = Some(task_id);
            *gesture = Gesture::Dragging {
                task_id,
                grab_offset_y: 0.0,
            };
        }
        ui.add_space(3.0);
    }
}

fn inbox_detail_line(task: &Task, participants: &[Participant]) -> String {
    let mut parts: Vec<String> = Vec::new();
    if !task.client.is_empty() {
        parts.push(task.client.clone());
    }
    if !task.department.is_empty() {
        parts.push(task.department.clone());
    }
    let names: Vec<&str> = task
        .participant_ids
        .iter()
        .filter_map(|id| participants.iter().find(|p| p.id == *id))
        .map(|p| p.name.as_str())
        .collect();
    if !names.is_empty() {
        parts.push(names.join(", "));
    }
    parts.join(" · ")
}
