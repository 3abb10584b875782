use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::course;

/// Text fields submitted alongside the course media.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseFields {
    pub title: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub duration: String,
}

impl CourseFields {
    /// Names of the multipart text parts that map onto course fields.
    pub const NAMES: [&'static str; 5] = ["title", "description", "price", "category", "duration"];

    /// Assign a text field by its multipart name. Returns `false` for unknown names.
    pub fn set(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "title" => &mut self.title,
            "description" => &mut self.description,
            "price" => &mut self.price,
            "category" => &mut self.category,
            "duration" => &mut self.duration,
            _ => return false,
        };
        *slot = value;
        true
    }
}

/// Course data ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub fields: CourseFields,
    pub image: String,
    pub videos: Vec<String>,
}

/// A persisted course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct Course {
    /// Course ID (UUIDv7).
    #[schema(value_type = String, example = "01936f0e-1234-7abc-8000-000000000001")]
    pub id: Uuid,
    #[schema(example = "Intro")]
    pub title: String,
    #[schema(example = "A gentle introduction")]
    pub description: String,
    /// Price exactly as submitted.
    #[schema(example = "10")]
    pub price: String,
    #[schema(example = "programming")]
    pub category: String,
    #[schema(example = "3h")]
    pub duration: String,
    /// Upload reference of the cover image; fetch it at `/{image}`.
    #[schema(example = "uploads/1718000000000-a.png")]
    pub image: String,
    /// Upload references of the videos, in submission order.
    #[schema(example = json!(["uploads/1718000000001-b.mp4", "uploads/1718000000002-c.mp4"]))]
    pub videos: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Course {
    /// Every upload reference owned by this course, image first.
    pub fn file_paths(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.image.as_str()).chain(self.videos.iter().map(String::as_str))
    }
}

impl From<course::Model> for Course {
    fn from(model: course::Model) -> Self {
        let videos = match model.videos {
            serde_json::Value::Array(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    serde_json::Value::String(path) => Some(path),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };

        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            price: model.price,
            category: model.category,
            duration: model.duration,
            image: model.image,
            videos,
            created_at: model.created_at,
        }
    }
}

/// Plain confirmation body.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Course deleted successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
