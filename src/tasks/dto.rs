use serde::Deserialize;

use crate::tasks::repo::{TaskPriority, TaskStatus};

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

/// Only supplied fields change; everything else keeps its current value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_defaults_to_pending_medium() {
        let req: CreateTaskRequest = serde_json::from_str(r#"{"title":"Write spec"}"#).unwrap();
        assert_eq!(req.title, "Write spec");
        assert!(req.description.is_none());
        assert_eq!(req.status.unwrap_or_default(), TaskStatus::Pending);
        assert_eq!(req.priority.unwrap_or_default(), TaskPriority::Medium);
    }

    #[test]
    fn create_request_accepts_explicit_enum_values() {
        let req: CreateTaskRequest = serde_json::from_str(
            r#"{"title":"T","status":"progress","priority":"high"}"#,
        )
        .unwrap();
        assert_eq!(req.status, Some(TaskStatus::Progress));
        assert_eq!(req.priority, Some(TaskPriority::High));
    }

    #[test]
    fn update_request_allows_empty_body() {
        let req: UpdateTaskRequest = serde_json::from_str("{}").unwrap();
        assert!(req.title.is_none());
        assert!(req.status.is_none());
    }
}
