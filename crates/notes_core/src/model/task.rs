//! Task domain model.
//!
//! # Responsibility
//! - Define the task record exchanged with the task service.
//! - Define the closed label sets for priority and display status.
//!
//! # Invariants
//! - `id` is assigned by the server and absent before creation.
//! - `title` is non-empty after trimming (`Task::validate`).
//! - Display status is derived per render and is never stored on `Task`.

use crate::date::CalendarDate;
use crate::status::resolve_status;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Server-assigned task identifier.
pub type TaskId = i64;

/// Task priority as labelled by the task service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    /// All priorities from lowest to highest.
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Critical,
    ];

    /// Wire/display label.
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    /// Maps a 1-based level (`1` = Low .. `4` = Critical).
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::Low),
            2 => Some(Self::Medium),
            3 => Some(Self::High),
            4 => Some(Self::Critical),
            _ => None,
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_label())
    }
}

impl FromStr for Priority {
    type Err = LabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(LabelError {
                kind: "priority",
                value: value.to_string(),
            }),
        }
    }
}

/// Derived status label shown next to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayStatus {
    /// Open and on time.
    Active,
    /// Done on time.
    Completed,
    /// Open past its deadline.
    Overdue,
    /// Done after its deadline passed.
    Late,
}

impl DisplayStatus {
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Overdue => "Overdue",
            Self::Late => "Late",
        }
    }

    /// Whether this status represents a finished task.
    pub fn is_completed(self) -> bool {
        matches!(self, Self::Completed | Self::Late)
    }
}

impl Display for DisplayStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_label())
    }
}

impl FromStr for DisplayStatus {
    type Err = LabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "overdue" => Ok(Self::Overdue),
            "late" => Ok(Self::Late),
            _ => Err(LabelError {
                kind: "status",
                value: value.to_string(),
            }),
        }
    }
}

/// Unknown label for one of the closed label sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelError {
    pub kind: &'static str,
    pub value: String,
}

impl Display for LabelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {} label `{}`", self.kind, self.value)
    }
}

impl Error for LabelError {}

/// Client-side validation failures for task drafts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty after trimming.
    EmptyTitle,
    /// Title is shorter than the service accepts once macros are stripped.
    TitleTooShort { min_chars: usize, actual: usize },
    /// `!before` macro carries a date that cannot be read.
    InvalidMacroDate(String),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooShort { min_chars, actual } => write!(
                f,
                "title must be at least {min_chars} characters long (got {actual})"
            ),
            Self::InvalidMacroDate(value) => write!(f, "invalid deadline in title: `{value}`"),
        }
    }
}

impl Error for TaskValidationError {}

/// Task record mirrored from the task service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: Option<TaskId>,
    pub title: String,
    /// Free text body (`description` on the wire).
    pub body: String,
    pub deadline: Option<CalendarDate>,
    pub completed: bool,
    pub priority: Option<Priority>,
    /// Server audit timestamp; never sent back.
    pub created_at: Option<NaiveDateTime>,
    /// Server audit timestamp; never sent back.
    pub updated_at: Option<NaiveDateTime>,
}

impl Task {
    /// Creates an unsaved, open task without deadline or priority.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            body: body.into(),
            deadline: None,
            completed: false,
            priority: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_id(mut self, id: TaskId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_deadline(mut self, deadline: Option<CalendarDate>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn with_priority(mut self, priority: Option<Priority>) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Derives the status for `today`. Must be recomputed on every render.
    pub fn display_status(&self, today: CalendarDate) -> DisplayStatus {
        resolve_status(self.completed, self.deadline, today)
    }

    /// Trims the title in place.
    pub fn normalize(&mut self) {
        let trimmed = self.title.trim();
        if trimmed.len() != self.title.len() {
            self.title = trimmed.to_string();
        }
    }

    /// Validates client-side invariants before sending.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{DisplayStatus, Priority, Task, TaskValidationError};

    #[test]
    fn labels_parse_case_insensitively_and_reject_unknown() {
        assert_eq!("critical".parse::<Priority>().unwrap(), Priority::Critical);
        assert_eq!(" Late ".parse::<DisplayStatus>().unwrap(), DisplayStatus::Late);

        let err = "urgent".parse::<Priority>().unwrap_err();
        assert_eq!(err.kind, "priority");
        assert!(err.to_string().contains("urgent"));
        assert!("done".parse::<DisplayStatus>().is_err());
    }

    #[test]
    fn label_round_trips_through_display() {
        for priority in Priority::ALL {
            assert_eq!(priority.to_string().parse::<Priority>().unwrap(), priority);
        }
        for status in [
            DisplayStatus::Active,
            DisplayStatus::Completed,
            DisplayStatus::Overdue,
            DisplayStatus::Late,
        ] {
            assert_eq!(status.as_label().parse::<DisplayStatus>().unwrap(), status);
        }
    }

    #[test]
    fn priority_levels_map_in_order() {
        assert_eq!(Priority::from_level(1), Some(Priority::Low));
        assert_eq!(Priority::from_level(4), Some(Priority::Critical));
        assert_eq!(Priority::from_level(0), None);
        assert_eq!(Priority::from_level(5), None);
    }

    #[test]
    fn validate_rejects_blank_title() {
        assert_eq!(
            Task::new("   ", "body").validate(),
            Err(TaskValidationError::EmptyTitle)
        );
        assert!(Task::new("Buy milk", "").validate().is_ok());
    }

    #[test]
    fn normalize_trims_title() {
        let mut task = Task::new("  Buy milk \n", "");
        task.normalize();
        assert_eq!(task.title, "Buy milk");
    }
}
