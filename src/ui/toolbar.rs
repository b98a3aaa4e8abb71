use chrono::Datelike;
use egui::{menu, RichText, Ui};

use crate::app::PlannerApp;
use crate::model::DisplayMode;
use crate::ui::theme;

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut PlannerApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  New Plan").clicked() {
                app.new_plan();
                ui.close_menu();
            }
            if ui.button("  Open...").clicked() {
                app.open_plan();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Save          Ctrl+S").clicked() {
                app.save_plan();
                ui.close_menu();
            }
            if ui.button("  Save As...").clicked() {
                app.save_plan_as();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Import CSV...").clicked() {
                app.import_csv();
                ui.close_menu();
            }
            if ui.button("  Export CSV...").clicked() {
                app.export_csv();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Edit  ").font(theme::font_menu()), |ui| {
            if ui
                .add_enabled(
                    app.history.can_undo(),
                    egui::Button::new("  Undo          Ctrl+Z"),
                )
                .clicked()
            {
                app.undo();
                ui.close_menu();
            }
            if ui
                .add_enabled(
                    app.history.can_redo(),
                    egui::Button::new("  Redo          Ctrl+Y"),
                )
                .clicked()
            {
                app.redo();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Add Task...").clicked() {
                app.show_add_task = true;
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            ui.label(RichText::new("Display").small().weak());
            for mode in [DisplayMode::Day, DisplayMode::Week] {
                if ui
                    .radio_value(&mut app.display_mode, mode, mode.label())
                    .clicked()
                {
                    ui.close_menu();
                }
            }
            ui.separator();
            if ui.button("  Today").clicked() {
                app.go_today();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        ui.separator();

        // Date navigation cluster
        if ui
            .button(RichText::new(egui_phosphor::regular::CARET_LEFT))
            .clicked()
        {
            app.go_prev();
        }
        if ui.button("Today").clicked() {
            app.go_today();
        }
        if ui
            .button(RichText::new(egui_phosphor::regular::CARET_RIGHT))
            .clicked()
        {
            app.go_next();
        }
        ui.label(
            RichText::new(format!(
                "{} {}",
                app.current_date.format("%B"),
                app.current_date.year()
            ))
            .strong()
            .size(13.0),
        );

        ui.separator();

        let undo_btn = egui::Button::new(RichText::new(egui_phosphor::regular::ARROW_U_UP_LEFT));
        if ui.add_enabled(app.history.can_undo(), undo_btn).clicked() {
            app.undo();
        }
        let redo_btn = egui::Button::new(RichText::new(egui_phosphor::regular::ARROW_U_UP_RIGHT));
        if ui.add_enabled(app.history.can_redo(), redo_btn).clicked() {
            app.redo();
        }

        // Right-aligned plan name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let modified = if app.file_path.is_some() { "" } else { " (unsaved)" };
            ui.label(
                RichText::new(format!("{}{}", app.plan.name, modified))
                    .size(11.0)
                    .weak(),
            );
        });
    });
}
