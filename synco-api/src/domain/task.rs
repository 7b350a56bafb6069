use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{GroupId, TaskId};

/// A to-do entry as returned by the tasks endpoints.
///
/// `id` is `None` until the server has persisted the task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: Option<TaskId>,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub group: Option<GroupId>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub created_at: Option<OffsetDateTime>,
}

impl Task {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
            completed: false,
            group: None,
            created_at: None,
        }
    }

    pub fn is_personal(&self) -> bool {
        self.group.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTask {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupId>,
}

/// Full replacement body for `PUT tasks/<id>/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateTask {
    pub text: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupId>,
}

impl UpdateTask {
    /// Body that keeps everything of `task` except the text.
    pub fn with_text(task: &Task, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: task.completed,
            group: task.group,
        }
    }

    /// Body that flips the completion state of `task`.
    pub fn toggled(task: &Task) -> Self {
        Self {
            text: task.text.clone(),
            completed: !task.completed,
            group: task.group,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_server_task() {
        let raw = r#"{
            "id": 7,
            "text": "buy milk",
            "completed": false,
            "group": null,
            "created_at": "2024-03-01T10:15:30.123456Z"
        }"#;

        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.id, Some(TaskId(7)));
        assert_eq!(task.text, "buy milk");
        assert!(task.is_personal());
        assert!(task.created_at.is_some());
    }

    #[test]
    fn tolerates_minimal_payload() {
        let task: Task = serde_json::from_str(r#"{"id": 1, "text": "x"}"#).unwrap();
        assert!(!task.completed);
        assert_eq!(task.group, None);
        assert_eq!(task.created_at, None);
    }

    #[test]
    fn update_body_omits_absent_group() {
        let task = Task {
            id: Some(TaskId(7)),
            ..Task::new("buy milk")
        };
        let body = serde_json::to_value(UpdateTask::with_text(&task, "buy oat milk")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "text": "buy oat milk", "completed": false })
        );

        let grouped = Task {
            group: Some(GroupId(2)),
            ..task
        };
        let body = serde_json::to_value(UpdateTask::toggled(&grouped)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "text": "buy milk", "completed": true, "group": 2 })
        );
    }
}
