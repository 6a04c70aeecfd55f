use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::tasks::dto::UpdateTaskRequest;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Progress,
    Completed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

/// Task record, always scoped to its owner.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Task {
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        title: &str,
        description: Option<&str>,
        status: TaskStatus,
        priority: TaskPriority,
    ) -> Result<Task, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (user_id, title, description, status, priority)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, title, description, status, priority, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(title)
        .bind(description)
        .bind(status)
        .bind(priority)
        .fetch_one(db)
        .await
    }

    /// All tasks for one owner, newest first.
    pub async fn list_by_owner(db: &PgPool, user_id: Uuid) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, title, description, status, priority, created_at, updated_at
            FROM tasks
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await
    }

    /// Partial update matching on id AND owner in one statement. A task
    /// belonging to someone else matches nothing, indistinguishable from a
    /// nonexistent id.
    pub async fn update(
        db: &PgPool,
        user_id: Uuid,
        task_id: Uuid,
        fields: &UpdateTaskRequest,
    ) -> Result<Option<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title       = COALESCE($3, title),
                description = COALESCE($4, description),
                status      = COALESCE($5, status),
                priority    = COALESCE($6, priority),
                updated_at  = now()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, title, description, status, priority, created_at, updated_at
            "#,
        )
        .bind(task_id)
        .bind(user_id)
        .bind(fields.title.as_deref().map(str::trim))
        .bind(fields.description.as_deref())
        .bind(fields.status)
        .bind(fields.priority)
        .fetch_optional(db)
        .await
    }

    /// Same owner-scoped predicate as update; false means nothing matched.
    pub async fn delete(db: &PgPool, user_id: Uuid, task_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(task_id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_and_priority_default_values() {
        assert_eq!(TaskStatus::default(), TaskStatus::Pending);
        assert_eq!(TaskPriority::default(), TaskPriority::Medium);
    }

    #[test]
    fn enums_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&TaskStatus::Progress).unwrap(), r#""progress""#);
        assert_eq!(serde_json::to_string(&TaskStatus::Completed).unwrap(), r#""completed""#);
        assert_eq!(serde_json::to_string(&TaskPriority::High).unwrap(), r#""high""#);
    }

    #[test]
    fn enums_deserialize_lowercase() {
        let status: TaskStatus = serde_json::from_str(r#""pending""#).unwrap();
        assert_eq!(status, TaskStatus::Pending);
        let priority: TaskPriority = serde_json::from_str(r#""low""#).unwrap();
        assert_eq!(priority, TaskPriority::Low);
        assert!(serde_json::from_str::<TaskStatus>(r#""done""#).is_err());
    }

    #[test]
    fn task_json_shape() {
        let task = Task {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Write spec".into(),
            description: None,
            status: TaskStatus::Pending,
            priority: TaskPriority::Medium,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains(r#""userId":"#));
        assert!(json.contains(r#""status":"pending""#));
        assert!(json.contains(r#""priority":"medium""#));
        assert!(json.contains("createdAt"));
    }
}
