use chrono::{NaiveDateTime, NaiveTime, Timelike};
use egui::{RichText, Ui};
use uuid::Uuid;

use crate::model::task::{Task, TaskStatus};
use crate::model::Participant;
use crate::ui::theme;

/// Actions the editor can request.
pub enum EditorAction {
    None,
    Changed,
    Delete(Uuid),
    Duplicate(Uuid),
    Unschedule(Uuid),
}

/// Render an inline editor for the selected task.
pub fn show_task_editor(
    task: &mut Task,
    participants: &[Participant],
    ui: &mut Ui,
) -> EditorAction {
    let mut action = EditorAction::None;
    let task_id = task.id;

    ui.add_space(6.0);
    ui.label(
        RichText::new("Edit Task")
            .strong()
            .size(13.0)
            .color(theme::TEXT_PRIMARY),
    );
    ui.add_space(4.0);

    let frame = egui::Frame {
        fill: theme::BG_DARK,
        rounding: egui::Rounding::same(4.0),
        inner_margin: egui::Margin::same(8.0),
        outer_margin: egui::Margin::ZERO,
        stroke: egui::Stroke::new(1.0, theme::BORDER_SUBTLE),
        shadow: egui::epaint::Shadow::NONE,
    };

    frame.show(ui, |ui| {
        ui.spacing_mut().item_spacing.y = 6.0;
        ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;

        field_label(ui, "Title");
        let title_edit = ui.add_sized(
            [ui.available_width(), 24.0],
            egui::TextEdit::singleline(&mut task.title)
                .font(egui::FontId::proportional(12.0))
                .text_color(theme::TEXT_PRIMARY),
        );
        if title_edit.changed() {
            action = EditorAction::Changed;
        }

        field_label(ui, "Status");
        egui::ComboBox::from_id_salt("status_combo")
            .selected_text(RichText::new(task.status.label()).size(11.0))
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for s in TaskStatus::all() {
                    if ui
                        .selectable_value(&mut task.status, *s, s.label())
                        .changed()
                    {
                        action = EditorAction::Changed;
                    }
                }
            });

        if let (Some(start), Some(end)) = (task.start, task.end) {
            field_label(ui, "Date");
            let mut date = start.date();
            if ui
                .add(egui_extras::DatePickerButton::new(&mut date).id_salt("editor_dp"))
                .changed()
            {
                task.start = Some(date.and_time(start.time()));
                task.end = Some(date.and_time(end.time()));
                action = EditorAction::Changed;
            }

            field_label(ui, "Start / End");
            ui.horizontal(|ui| {
                let mut start_time = start.time();
                let mut end_time = end.time();
                let start_changed = time_picker(ui, "start_time", &mut start_time);
                ui.label(RichText::new("→").color(theme::TEXT_DIM));
                let end_changed = time_picker(ui, "end_time", &mut end_time);
                if start_changed || end_changed {
                    let new_start = NaiveDateTime::new(date, start_time);
                    let mut new_end = NaiveDateTime::new(date, end_time);
                    // Keep the interval forward; a collapsed edit pushes the
                    // end a quarter hour past the start.
                    if new_end <= new_start {
                        new_end = new_start + chrono::Duration::minutes(15);
                    }
                    task.start = Some(new_start);
                    task.end = Some(new_end);
                    action = EditorAction::Changed;
                }
            });
        }

        field_label(ui, "Client");
        if ui
            .add_sized(
                [ui.available_width(), 22.0],
                egui::TextEdit::singleline(&mut task.client),
            )
            .changed()
        {
            action = EditorAction::Changed;
        }

        field_label(ui, "Department");
        if ui
            .add_sized(
                [ui.available_width(), 22.0],
                egui::TextEdit::singleline(&mut task.department),
            )
            .changed()
        {
            action = EditorAction::Changed;
        }

        if !participants.is_empty() {
            field_label(ui, "Participants");
            for participant in participants {
                let mut assigned = task.participant_ids.contains(&participant.id);
                if ui
                    .checkbox(&mut assigned, RichText::new(&participant.name).size(11.0))
                    .changed()
                {
                    if assigned {
                        task.participant_ids.push(participant.id);
                    } else {
                        task.participant_ids.retain(|id| *id != participant.id);
                    }
                    action = EditorAction::Changed;
                }
            }
        }

        field_label(ui, "Notes");
        if ui
            .add_sized(
                [ui.available_width(), 48.0],
                egui::TextEdit::multiline(&mut task.notes).font(egui::FontId::proportional(11.0)),
            )
            .changed()
        {
            action = EditorAction::Changed;
        }

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            if ui.small_button("Duplicate").clicked() {
                action = EditorAction::Duplicate(task_id);
            }
            if task.is_scheduled() && ui.small_button("To Inbox").clicked() {
                action = EditorAction::Unschedule(task_id);
            }
            if ui
                .small_button(RichText::new("Delete").color(theme::NOW_LINE))
                .clicked()
            {
                action = EditorAction::Delete(task_id);
            }
        });
    });

    action
}

fn field_label(ui: &mut Ui, text: &str) {
    ui.label(
        RichText::new(text)
            .size(10.0)
            .color(theme::TEXT_DIM)
            .strong(),
    );
}

/// Hour/minute drag-values; minutes step by the snap granularity.
fn time_picker(ui: &mut Ui, salt: &str, time: &mut NaiveTime) -> bool {
    let mut hour = time.hour();
    let mut minute = time.minute();
    let mut changed = false;

    ui.push_id(salt, |ui| {
        changed |= ui
            .add(
                egui::DragValue::new(&mut hour)
                    .range(0..=23)
                    .custom_formatter(|v, _| format!("{:02}", v as u32)),
            )
            .changed();
        ui.label(":");
        changed |= ui
            .add(
                egui::DragValue::new(&mut minute)
                    .range(0..=45)
                    .speed(0.3)
                    .custom_formatter(|v, _| format!("{:02}", v as u32)),
            )
            .changed();
    });

    if changed {
        let minute = (minute / 15) * 15;
        if let Some(t) = NaiveTime::from_hms_opt(hour, minute, 0) {
            *time = t;
        }
    }
    changed
}
