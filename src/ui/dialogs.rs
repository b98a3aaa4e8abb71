use egui::{Color32, Context, RichText, Window};

use crate::app::PlannerApp;
use crate::ui::theme;

/// Render the "Add Task" dialog.
pub fn show_add_task_dialog(app: &mut PlannerApp, ctx: &Context) {
    let mut should_close = false;
    Window::new(RichText::new("Add Task").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([320.0, 0.0])
        .show(ctx, |ui| {
            ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;
            ui.visuals_mut().faint_bg_color = Color32::TRANSPARENT;
            ui.visuals_mut().striped = false;

            ui.add_space(4.0);

            egui::Grid::new("add_task_grid")
                .num_columns(2)
                .striped(false)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Title").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [220.0, 24.0],
                        egui::TextEdit::singleline(&mut app.new_task_title)
                            .hint_text("Task title...")
                            .text_color(theme::TEXT_PRIMARY),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Client").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [220.0, 22.0],
                        egui::TextEdit::singleline(&mut app.new_task_client),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Schedule").color(theme::TEXT_SECONDARY));
                    ui.checkbox(&mut app.new_task_scheduled, "Place on calendar");
                    ui.end_row();

                    if app.new_task_scheduled {
                        ui.label(RichText::new("Date").color(theme::TEXT_SECONDARY));
                        ui.add(
                            egui_extras::DatePickerButton::new(&mut app.new_task_date)
                                .id_salt("dlg_dp_date"),
                        );
                        ui.end_row();

                        ui.label(RichText::new("Start hour").color(theme::TEXT_SECONDARY));
                        ui.add(egui::Slider::new(&mut app.new_task_hour, 0..=23));
                        ui.end_row();
                    }
                });

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let create_btn =
                    egui::Button::new(RichText::new("Create").color(Color32::WHITE))
                        .fill(theme::ACCENT)
                        .rounding(egui::Rounding::same(4.0));
                if ui.add_sized([80.0, 28.0], create_btn).clicked() {
                    app.create_task_from_dialog();
                    should_close = true;
                }
                if ui
                    .add_sized([80.0, 28.0], egui::Button::new("Cancel"))
                    .clicked()
                {
                    should_close = true;
                }
            });
            ui.add_space(2.0);
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_add_task = false;
    }
}

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut PlannerApp, ctx: &Context) {
    let mut open = app.show_about;
    Window::new(RichText::new("About Weekboard").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .open(&mut open)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(6.0);
            ui.label(RichText::new("Weekboard").strong().size(16.0));
            ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
            ui.add_space(6.0);
            ui.label(
                RichText::new(
                    "A day/week planner. Drag tasks out of the inbox onto the \
                     calendar, move and resize them on a 15-minute grid, and \
                     undo anything with Ctrl+Z.",
                )
                .size(11.0)
                .color(theme::TEXT_SECONDARY),
            );
            ui.add_space(6.0);
        });
    app.show_about = open;
}
