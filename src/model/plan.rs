use chrono::{DateTime, Utc};
use egui::Color32;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::task::Task;

/// A person tasks can be assigned to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: Uuid,
    pub name: String,
    /// Strip color on calendar blocks (stored as RGBA).
    #[serde(with = "color_serde")]
    pub color: Color32,
}

impl Participant {
    pub fn new(name: impl Into<String>, color: Color32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color,
        }
    }
}

/// A planning document: all tasks (scheduled and inbox), the people they
/// reference, and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,
    pub tasks: Vec<Task>,
    pub participants: Vec<Participant>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Default for Plan {
    fn default() -> Self {
        Self {
            name: "Untitled Plan".to_string(),
            tasks: Vec::new(),
            participants: Vec::new(),
            created: Utc::now(),
            modified: Utc::now(),
        }
    }
}

impl Plan {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Touch the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    pub fn scheduled_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_scheduled()).count()
    }

    pub fn unscheduled_count(&self) -> usize {
        self.tasks.len() - self.scheduled_count()
    }
}

/// Serde helper for `Color32`.
mod color_serde {
    use egui::Color32;
    use serde::{self, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let rgba = [color.r(), color.g(), color.b(), color.a()];
        rgba.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rgba: [u8; 4] = Deserialize::deserialize(deserializer)?;
        Ok(Color32::from_rgba_premultiplied(
            rgba[0], rgba[1], rgba[2], rgba[3],
        ))
    }
}
