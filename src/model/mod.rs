pub mod calendar;
pub mod history;
pub mod layout;
pub mod plan;
pub mod schedule;
pub mod task;

pub use calendar::DisplayMode;
pub use history::History;
pub use layout::{LayoutCache, ProcessedTask};
pub use plan::{Participant, Plan};
pub use schedule::Gesture;
pub use task::{Task, TaskStatus};
