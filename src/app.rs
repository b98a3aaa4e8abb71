use chrono::{Duration, NaiveDate};
use std::path::PathBuf;
use uuid::Uuid;

use crate::model::{calendar, schedule, DisplayMode, Gesture, History, LayoutCache, Participant, Plan, Task};
use crate::ui;

/// Main application state.
pub struct PlannerApp {
    pub plan: Plan,
    pub file_path: Option<PathBuf>,
    pub selected_task: Option<Uuid>,

    // Calendar viewport
    pub current_date: NaiveDate,
    pub display_mode: DisplayMode,

    // Undo / redo over the task collection
    pub history: History,

    // Active pointer gesture (drag or resize), at most one at a time
    pub gesture: Gesture,

    // Layout memoization; `revision` bumps on every task-list mutation
    layout_cache: LayoutCache,
    revision: u64,
    scroll_to_now: bool,

    // Dialog state
    pub show_add_task: bool,
    pub show_about: bool,
    pub new_task_title: String,
    pub new_task_client: String,
    pub new_task_scheduled: bool,
    pub new_task_date: NaiveDate,
    pub new_task_hour: u32,

    // Status message
    pub status_message: String,

    // True when the window is below the narrow breakpoint; updated each frame
    narrow: bool,
}

impl PlannerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let plan = Self::sample_plan();
        let history = History::new(plan.tasks.clone());
        let today = chrono::Local::now().date_naive();

        Self {
            plan,
            file_path: None,
            selected_task: None,
            current_date: today,
            display_mode: DisplayMode::Week,
            history,
            gesture: Gesture::Idle,
            layout_cache: LayoutCache::new(),
            revision: 0,
            scroll_to_now: true,
            show_add_task: false,
            show_about: false,
            new_task_title: String::new(),
            new_task_client: String::new(),
            new_task_scheduled: true,
            new_task_date: today,
            new_task_hour: 9,
            status_message: "Ready".to_string(),
            narrow: false,
        }
    }

    /// Generate a sample plan for demonstration.
    fn sample_plan() -> Plan {
        let today = chrono::Local::now().date_naive();
        let slot = |d: NaiveDate, h: u32, m: u32| {
            d.and_time(chrono::NaiveTime::MIN)
                + Duration::minutes(h as i64 * 60 + m as i64)
        };

        let mut plan = Plan::new("Sample Plan");
        plan.participants = vec![
            Participant::new("Nora Berg", ui::theme::participant_color(0)),
            Participant::new("Sam Okoye", ui::theme::participant_color(3)),
            Participant::new("Lea Fontaine", ui::theme::participant_color(5)),
        ];
        let nora = plan.participants[0].id;
        let lea = plan.participants[2].id;

        let mut review = Task::new("Daily review", slot(today, 9, 0), slot(today, 9, 30));
        review.status = crate::model::TaskStatus::Done;
        review.department = "Operations".to_string();

        // Three overlapping tasks exercising the column packer
        let mut ads = Task::new("Review ad campaign", slot(today, 10, 0), slot(today, 11, 0));
        ads.client = "Natura House".to_string();
        ads.department = "Marketing".to_string();
        let mut copy = Task::new("Draft landing copy", slot(today, 10, 30), slot(today, 11, 30));
        copy.client = "Natura House".to_string();
        let mut audit = Task::new("SEO audit call", slot(today, 10, 45), slot(today, 12, 0));
        audit.client = "3aChem".to_string();
        audit.department = "SEO".to_string();
        audit.status = crate::model::TaskStatus::InProgress;

        let mut strategy = Task::new("Q4 strategy meeting", slot(today, 14, 0), slot(today, 15, 0));
        strategy.client = "Global Solutions".to_string();
        strategy.participant_ids = vec![nora, lea];

        let planning = Task::new(
            "Sprint planning",
            slot(today + Duration::days(1), 11, 0),
            slot(today + Duration::days(1), 12, 30),
        );

        let mut proposal = Task::unscheduled("Write renewal proposal");
        proposal.client = "3aChem".to_string();
        let mut onboarding = Task::unscheduled("Prepare onboarding deck");
        onboarding.department = "Marketing".to_string();

        plan.tasks = vec![review, ads, copy, audit, strategy, planning, proposal, onboarding];
        plan
    }

    // --- History plumbing ---

    fn mark_dirty(&mut self) {
        self.revision += 1;
        self.plan.touch();
    }

    /// Inline editor edits mutate tasks in place; fold the whole burst into
    /// one undo step the moment anything else needs the history.
    fn flush_pending_edits(&mut self) {
        if self.plan.tasks != self.history.current() {
            self.history.record(self.plan.tasks.clone());
        }
    }

    /// Record the current task list as a new undoable snapshot.
    fn push_history(&mut self) {
        self.history.record(self.plan.tasks.clone());
    }

    pub fn undo(&mut self) {
        self.flush_pending_edits();
        if let Some(snapshot) = self.history.undo() {
            self.plan.tasks = snapshot.to_vec();
            self.mark_dirty();
            self.drop_stale_selection();
            self.status_message = "Undo".to_string();
        }
    }

    pub fn redo(&mut self) {
        self.flush_pending_edits();
        if let Some(snapshot) = self.history.redo() {
            self.plan.tasks = snapshot.to_vec();
            self.mark_dirty();
            self.drop_stale_selection();
            self.status_message = "Redo".to_string();
        }
    }

    fn drop_stale_selection(&mut self) {
        if let Some(id) = self.selected_task {
            if !self.plan.tasks.iter().any(|t| t.id == id) {
                self.selected_task = None;
            }
        }
    }

    // --- Task operations ---

    /// Commit a task record produced by a completed drag, drop, or resize.
    pub fn apply_gesture_update(&mut self, updated: Task) {
        self.flush_pending_edits();
        let title = updated.title.clone();
        let (start, end) = (updated.start, updated.end);
        if let Some(task) = self.plan.tasks.iter_mut().find(|t| t.id == updated.id) {
            *task = updated;
        } else {
            return;
        }
        self.push_history();
        self.mark_dirty();
        self.status_message = match (start, end) {
            (Some(s), Some(e)) => format!(
                "Scheduled '{}' {} {}-{}",
                title,
                s.format("%a %d %b"),
                s.format("%H:%M"),
                e.format("%H:%M")
            ),
            _ => format!("Updated '{}'", title),
        };
    }

    pub fn create_task_from_dialog(&mut self) {
        let title = if self.new_task_title.is_empty() {
            "New Task".to_string()
        } else {
            self.new_task_title.clone()
        };

        let mut task = if self.new_task_scheduled {
            let start = self.new_task_date.and_time(chrono::NaiveTime::MIN)
                + Duration::hours(self.new_task_hour as i64);
            Task::new(title, start, start + Duration::minutes(schedule::DEFAULT_DROP_DURATION))
        } else {
            Task::unscheduled(title)
        };
        task.client = self.new_task_client.clone();

        self.flush_pending_edits();
        self.selected_task = Some(task.id);
        self.plan.tasks.push(task);
        self.push_history();
        self.mark_dirty();
        self.reset_dialog_fields();
        self.status_message = "Task added".to_string();
    }

    pub fn delete_task(&mut self, id: Uuid) {
        self.flush_pending_edits();
        self.plan.tasks.retain(|t| t.id != id);
        self.push_history();
        self.mark_dirty();
        if self.selected_task == Some(id) {
            self.selected_task = None;
        }
        self.status_message = "Task deleted".to_string();
    }

    pub fn duplicate_task(&mut self, id: Uuid) {
        let original = match self.plan.tasks.iter().find(|t| t.id == id) {
            Some(t) => t.clone(),
            None => return,
        };
        let mut copy = original;
        copy.id = Uuid::new_v4();
        copy.title = format!("{} (Copy)", copy.title);

        self.flush_pending_edits();
        self.selected_task = Some(copy.id);
        self.plan.tasks.push(copy);
        self.push_history();
        self.mark_dirty();
        self.status_message = "Task duplicated".to_string();
    }

    /// Send a scheduled task back to the inbox.
    pub fn unschedule_task(&mut self, id: Uuid) {
        self.flush_pending_edits();
        if let Some(task) = self.plan.tasks.iter_mut().find(|t| t.id == id) {
            task.start = None;
            task.end = None;
        } else {
            return;
        }
        self.push_history();
        self.mark_dirty();
        self.status_message = "Task moved to inbox".to_string();
    }

    // --- Navigation ---

    pub fn go_prev(&mut self) {
        self.current_date -= calendar::navigation_step(self.display_mode, self.narrow);
    }

    pub fn go_next(&mut self) {
        self.current_date += calendar::navigation_step(self.display_mode, self.narrow);
    }

    pub fn go_today(&mut self) {
        self.current_date = chrono::Local::now().date_naive();
        self.scroll_to_now = true;
    }

    // --- File operations ---

    pub fn new_plan(&mut self) {
        self.plan = Plan::default();
        self.file_path = None;
        self.selected_task = None;
        self.history.reset(Vec::new());
        self.mark_dirty();
        self.status_message = "New plan created".to_string();
    }

    pub fn open_plan(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Weekboard Plan", &["plan.json", "json"])
            .pick_file()
        {
            match crate::io::load_plan(&path) {
                Ok(plan) => {
                    self.history.reset(plan.tasks.clone());
                    self.plan = plan;
                    self.file_path = Some(path);
                    self.selected_task = None;
                    self.mark_dirty();
                    self.status_message = "Plan loaded".to_string();
                }
                Err(e) => {
                    self.status_message = format!("Error loading: {}", e);
                }
            }
        }
    }

    pub fn save_plan(&mut self) {
        if let Some(path) = self.file_path.clone() {
            self.flush_pending_edits();
            self.plan.touch();
            match crate::io::save_plan(&self.plan, &path) {
                Ok(()) => self.status_message = "Plan saved".to_string(),
                Err(e) => self.status_message = format!("Error saving: {}", e),
            }
        } else {
            self.save_plan_as();
        }
    }

    pub fn save_plan_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Weekboard Plan", &["plan.json", "json"])
            .set_file_name(format!("{}.plan.json", self.plan.name))
            .save_file()
        {
            self.file_path = Some(path.clone());
            self.flush_pending_edits();
            self.plan.touch();
            match crate::io::save_plan(&self.plan, &path) {
                Ok(()) => self.status_message = "Plan saved".to_string(),
                Err(e) => self.status_message = format!("Error saving: {}", e),
            }
        }
    }

    pub fn import_csv(&mut self) {
        // Guard: if current plan has tasks, confirm before replacing
        if !self.plan.tasks.is_empty() {
            let confirm = rfd::MessageDialog::new()
                .set_title("Import CSV")
                .set_description("This will replace the current plan. Continue?")
                .set_buttons(rfd::MessageButtons::YesNo)
                .show();
            if confirm != rfd::MessageDialogResult::Yes {
                return;
            }
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv", "txt"])
            .pick_file()
        {
            match crate::io::csv_import::import_csv(&path) {
                Ok((tasks, skipped)) => {
                    let plan_name = path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or("Imported Plan")
                        .to_string();

                    let count = tasks.len();
                    self.history.reset(tasks.clone());
                    self.plan = Plan::new(plan_name);
                    self.plan.tasks = tasks;
                    self.file_path = None;
                    self.selected_task = None;
                    self.mark_dirty();

                    self.status_message = if skipped > 0 {
                        format!("Imported {} tasks ({} rows skipped)", count, skipped)
                    } else {
                        format!("Imported {} tasks", count)
                    };
                }
                Err(e) => {
                    self.status_message = format!("CSV import failed: {}", e);
                }
            }
        }
    }

    pub fn export_csv(&mut self) {
        if self.plan.tasks.is_empty() {
            self.status_message = "Nothing to export: plan has no tasks".to_string();
            return;
        }

        let default_name = format!("{}.csv", self.plan.name);
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(&default_name)
            .save_file()
        {
            match crate::io::csv_export::export_csv(&self.plan.tasks, &path) {
                Ok(count) => {
                    self.status_message = format!("Exported {} tasks to CSV", count);
                }
                Err(e) => {
                    self.status_message = format!("CSV export failed: {}", e);
                }
            }
        }
    }

    fn reset_dialog_fields(&mut self) {
        self.new_task_title = String::new();
        self.new_task_client = String::new();
        self.new_task_scheduled = true;
        self.new_task_date = chrono::Local::now().date_naive();
        self.new_task_hour = 9;
    }
}

impl eframe::App for PlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        // Keep the current-time line moving without any task churn.
        ctx.request_repaint_after(std::time::Duration::from_secs(60));

        self.narrow = ctx.screen_rect().width() < calendar::NARROW_BREAKPOINT;

        // Handle keyboard shortcuts outside closures to avoid borrow issues
        let should_save = ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::S));
        let should_undo = ctx.input(|i| {
            i.modifiers.command && !i.modifiers.shift && i.key_pressed(egui::Key::Z)
        });
        let should_redo = ctx.input(|i| {
            i.modifiers.command
                && (i.key_pressed(egui::Key::Y)
                    || (i.modifiers.shift && i.key_pressed(egui::Key::Z)))
        });
        if should_save {
            self.save_plan();
        }
        if should_undo {
            self.undo();
        }
        if should_redo {
            self.redo();
        }

        let days = calendar::visible_days(self.current_date, self.display_mode, self.narrow);

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_status())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "{} scheduled · {} in inbox",
                                self.plan.scheduled_count(),
                                self.plan.unscheduled_count()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Left panel: editor for the selected task + inbox
        let mut editor_changed = false;
        let mut pending_delete: Option<Uuid> = None;
        let mut pending_duplicate: Option<Uuid> = None;
        let mut pending_unschedule: Option<Uuid> = None;
        let participants = self.plan.participants.clone();
        egui::SidePanel::left("inbox_panel")
            .default_width(240.0)
            .min_width(180.0)
            .max_width(420.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(8.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                if let Some(sel_id) = self.selected_task {
                    if let Some(task) = self.plan.tasks.iter_mut().find(|t| t.id == sel_id) {
                        match ui::task_editor::show_task_editor(task, &participants, ui) {
                            ui::task_editor::EditorAction::Changed => editor_changed = true,
                            ui::task_editor::EditorAction::Delete(id) => {
                                pending_delete = Some(id)
                            }
                            ui::task_editor::EditorAction::Duplicate(id) => {
                                pending_duplicate = Some(id)
                            }
                            ui::task_editor::EditorAction::Unschedule(id) => {
                                pending_unschedule = Some(id)
                            }
                            ui::task_editor::EditorAction::None => {}
                        }
                    }
                    ui.add_space(4.0);
                    ui.separator();
                    ui.add_space(2.0);
                }

                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui::inbox_panel::show_inbox(
                            &self.plan.tasks,
                            &participants,
                            &mut self.gesture,
                            &mut self.selected_task,
                            ui,
                        );
                    });
            });

        if editor_changed {
            self.mark_dirty();
            self.status_message = "Task updated".to_string();
        }
        if let Some(id) = pending_delete {
            self.delete_task(id);
        }
        if let Some(id) = pending_duplicate {
            self.duplicate_task(id);
        }
        if let Some(id) = pending_unschedule {
            self.unschedule_task(id);
        }

        // Central panel: calendar grid
        let scroll_to_now = std::mem::take(&mut self.scroll_to_now);
        let grid_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        let interaction = egui::CentralPanel::default()
            .frame(grid_frame)
            .show(ctx, |ui| {
                ui::calendar_grid::show_calendar_grid(
                    &self.plan.tasks,
                    &mut self.layout_cache,
                    self.revision,
                    &days,
                    &participants,
                    &mut self.gesture,
                    &mut self.selected_task,
                    scroll_to_now,
                    ui,
                )
            })
            .inner;

        if let Some(updated) = interaction.updated_task {
            self.apply_gesture_update(updated);
        }

        // A gesture whose terminal event landed nowhere (drag cancelled by
        // the platform, block deleted mid-resize) is discarded once the
        // pointer is up, without a commit.
        let pointer_down = ctx.input(|i| i.pointer.any_down());
        if !self.gesture.is_idle() && !pointer_down && !egui::DragAndDrop::has_any_payload(ctx) {
            self.gesture.clear();
        }

        // Dialogs
        if self.show_add_task {
            ui::dialogs::show_add_task_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}
