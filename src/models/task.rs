use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents the priority of a task.
/// Corresponds to the `task_priority` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    /// Low priority.
    Low,
    /// Normal priority.
    Normal,
    /// Urgent priority.
    Urgent,
}

/// Input structure for creating a task.
/// Contains validation rules for its fields.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The title of the task.
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// An optional description for the task.
    /// Maximum length of 1000 characters if provided.
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// When the task was created, supplied by the client and normalized to UTC.
    pub creation_date: DateTime<Utc>,

    /// Optional planned end date for the task.
    pub ending_date: Option<DateTime<Utc>>,

    /// When the task actually ended, if it has.
    pub actual_end_date: Option<DateTime<Utc>>,

    /// The priority of the task.
    pub priority: TaskPriority,
}

/// Partial update payload for a task. Absent fields keep their stored value.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskUpdate {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    pub ending_date: Option<DateTime<Utc>>,

    pub actual_end_date: Option<DateTime<Utc>>,

    pub priority: Option<TaskPriority>,
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    /// The title of the task.
    pub title: String,
    /// An optional description for the task.
    pub description: Option<String>,
    /// When the task was created.
    pub creation_date: DateTime<Utc>,
    /// Optional planned end date for the task.
    pub ending_date: Option<DateTime<Utc>>,
    /// When the task actually ended, if it has.
    pub actual_end_date: Option<DateTime<Utc>>,
    /// The priority of the task.
    pub priority: TaskPriority,
}

impl Task {
    /// Creates a new `Task` instance from `TaskInput`, assigning a fresh UUID.
    pub fn new(input: TaskInput) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            creation_date: input.creation_date,
            ending_date: input.ending_date,
            actual_end_date: input.actual_end_date,
            priority: input.priority,
        }
    }

    /// Merges a partial update into this task, field by field.
    /// Fields absent from the payload are left untouched.
    pub fn apply(&mut self, update: TaskUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(ending_date) = update.ending_date {
            self.ending_date = Some(ending_date);
        }
        if let Some(actual_end_date) = update.actual_end_date {
            self.actual_end_date = Some(actual_end_date);
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_input() -> TaskInput {
        TaskInput {
            title: "Implement User Authentication".to_string(),
            description: Some("JWT generation and password hashing.".to_string()),
            creation_date: Utc::now(),
            ending_date: None,
            actual_end_date: None,
            priority: TaskPriority::Normal,
        }
    }

    #[test]
    fn test_task_creation() {
        let input = sample_input();
        let task = Task::new(input);
        assert_eq!(task.title, "Implement User Authentication");
        assert_eq!(task.priority, TaskPriority::Normal);
        assert!(task.ending_date.is_none());
        assert!(task.actual_end_date.is_none());
    }

    #[test]
    fn test_task_input_validation() {
        let valid_input = sample_input();
        assert!(valid_input.validate().is_ok());

        let mut empty_title = sample_input();
        empty_title.title = "".to_string();
        assert!(empty_title.validate().is_err());

        let mut long_title = sample_input();
        long_title.title = "a".repeat(201);
        assert!(long_title.validate().is_err());

        let mut long_description = sample_input();
        long_description.description = Some("b".repeat(1001));
        assert!(long_description.validate().is_err());
    }

    #[test]
    fn test_task_update_applies_only_present_fields() {
        let mut task = Task::new(sample_input());
        let original_creation = task.creation_date;
        let ended = Utc::now();

        task.apply(TaskUpdate {
            title: Some("Database Schema Design".to_string()),
            description: None,
            ending_date: None,
            actual_end_date: Some(ended),
            priority: Some(TaskPriority::Urgent),
        });

        assert_eq!(task.title, "Database Schema Design");
        // Absent fields are untouched
        assert_eq!(
            task.description.as_deref(),
            Some("JWT generation and password hashing.")
        );
        assert_eq!(task.creation_date, original_creation);
        assert_eq!(task.actual_end_date, Some(ended));
        assert_eq!(task.priority, TaskPriority::Urgent);
    }

    #[test]
    fn test_priority_serialization() {
        assert_eq!(
            serde_json::to_string(&TaskPriority::Low).unwrap(),
            "\"low\""
        );
        assert_eq!(
            serde_json::to_string(&TaskPriority::Normal).unwrap(),
            "\"normal\""
        );
        assert_eq!(
            serde_json::to_string(&TaskPriority::Urgent).unwrap(),
            "\"urgent\""
        );

        let parsed: TaskPriority = serde_json::from_str("\"urgent\"").unwrap();
        assert_eq!(parsed, TaskPriority::Urgent);
    }
}
