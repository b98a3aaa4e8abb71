pub mod calendar_grid;
pub mod dialogs;
pub mod inbox_panel;
pub mod task_editor;
pub mod theme;
pub mod toolbar;
