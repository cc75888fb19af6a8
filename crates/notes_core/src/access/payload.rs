//! JSON payload exchanged with the task service.
//!
//! # Invariants
//! - `status`, `createdAt` and `updatedAt` are read but never written.
//! - A deadline or timestamp that cannot be read degrades to absent.

use crate::date::{from_iso, to_iso};
use crate::model::task::{DisplayStatus, Priority, Task, TaskId};
use chrono::NaiveDateTime;
use log::warn;
use serde::{Deserialize, Serialize};

/// Wire form of a task (`camelCase` JSON).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TaskId>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// ISO-8601 date or null.
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default, skip_serializing)]
    pub status: Option<DisplayStatus>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing)]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing)]
    pub updated_at: Option<String>,
}

impl TaskPayload {
    /// Builds the outgoing payload for `task`.
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: Some(task.body.clone()),
            deadline: task.deadline.map(to_iso),
            status: None,
            priority: task.priority,
            created_at: None,
            updated_at: None,
        }
    }

    /// Same as `from_task` without the id, for creation requests.
    pub fn for_create(task: &Task) -> Self {
        Self {
            id: None,
            ..Self::from_task(task)
        }
    }

    /// Converts a received payload into a task.
    ///
    /// Completion is read from the server status label (`Completed`/`Late`).
    pub fn into_task(self) -> Task {
        let deadline = self.deadline.as_deref().and_then(|raw| match from_iso(raw) {
            Ok(date) => date,
            Err(err) => {
                warn!(
                    "event=payload_decode module=access status=degraded field=deadline id={} error={}",
                    self.id.map_or_else(|| "none".to_string(), |id| id.to_string()),
                    err
                );
                None
            }
        });

        Task {
            id: self.id,
            title: self.title,
            body: self.description.unwrap_or_default(),
            deadline,
            completed: self.status.is_some_and(DisplayStatus::is_completed),
            priority: self.priority,
            created_at: self.created_at.as_deref().and_then(parse_timestamp),
            updated_at: self.updated_at.as_deref().and_then(parse_timestamp),
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    raw.parse::<NaiveDateTime>().ok()
}

#[cfg(test)]
mod tests {
    use super::TaskPayload;
    use crate::date::CalendarDate;
    use crate::model::task::{Priority, Task};
    use serde_json::json;

    #[test]
    fn outgoing_payload_omits_derived_and_audit_fields() {
        let task = Task::new("Buy milk", "2 liters")
            .with_id(5)
            .with_deadline(CalendarDate::from_ymd_opt(2025, 5, 6))
            .with_priority(Some(Priority::High))
            .with_completed(true);

        let value = serde_json::to_value(TaskPayload::from_task(&task)).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 5,
                "title": "Buy milk",
                "description": "2 liters",
                "deadline": "2025-05-06",
                "priority": "High"
            })
        );

        let create = serde_json::to_value(TaskPayload::for_create(&task)).unwrap();
        assert!(create.get("id").is_none());
        assert!(create.get("status").is_none());
    }

    #[test]
    fn incoming_payload_derives_completion_from_status_label() {
        let payload: TaskPayload = serde_json::from_value(json!({
            "id": 9,
            "title": "Report",
            "description": null,
            "deadline": "2025-05-06",
            "status": "Late",
            "priority": "Critical",
            "createdAt": "2025-05-01T09:30:00.123456",
            "updatedAt": null
        }))
        .unwrap();

        let task = payload.into_task();
        assert_eq!(task.id, Some(9));
        assert!(task.completed);
        assert_eq!(task.body, "");
        assert_eq!(task.deadline, CalendarDate::from_ymd_opt(2025, 5, 6));
        assert_eq!(task.priority, Some(Priority::Critical));
        assert!(task.created_at.is_some());
        assert!(task.updated_at.is_none());
    }

    #[test]
    fn malformed_deadline_degrades_to_absent() {
        let payload: TaskPayload = serde_json::from_value(json!({
            "id": 1,
            "title": "Broken",
            "deadline": "06.05.2025",
            "status": "Active"
        }))
        .unwrap();

        let task = payload.into_task();
        assert_eq!(task.deadline, None);
        assert!(!task.completed);
    }

    #[test]
    fn unknown_status_label_is_a_decode_error() {
        let result = serde_json::from_value::<TaskPayload>(json!({
            "title": "Odd",
            "status": "Archived"
        }));
        assert!(result.is_err());
    }
}
