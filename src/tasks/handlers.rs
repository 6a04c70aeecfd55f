use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::extractors::CurrentUser;
use crate::error::{ApiError, ApiResponse};
use crate::state::AppState;
use crate::tasks::dto::{CreateTaskRequest, UpdateTaskRequest};
use crate::tasks::repo::Task;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/task", post(create_task).get(list_tasks))
        .route("/task/:id", put(update_task).delete(delete_task))
}

#[instrument(skip_all)]
pub async fn create_task(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Task>>), ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::Validation("Title is required".into()));
    }

    let task = Task::create(
        &state.db,
        user.id,
        payload.title.trim(),
        payload.description.as_deref(),
        payload.status.unwrap_or_default(),
        payload.priority.unwrap_or_default(),
    )
    .await?;

    info!(task_id = %task.id, user_id = %user.id, "task created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Task created successfully", task)),
    ))
}

#[instrument(skip_all)]
pub async fn list_tasks(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ApiResponse<Vec<Task>>>, ApiError> {
    let tasks = Task::list_by_owner(&state.db, user.id).await?;
    Ok(Json(ApiResponse::ok("Tasks fetched successfully", tasks)))
}

#[instrument(skip_all)]
pub async fn update_task(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<Json<ApiResponse<Task>>, ApiError> {
    if let Some(title) = &payload.title {
        if title.trim().is_empty() {
            return Err(ApiError::Validation("Title cannot be empty".into()));
        }
    }

    // The owner is part of the match predicate, so another user's task id
    // comes back as not found.
    let task = Task::update(&state.db, user.id, id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".into()))?;

    info!(task_id = %task.id, user_id = %user.id, "task updated");
    Ok(Json(ApiResponse::ok("Task updated successfully", task)))
}

#[instrument(skip_all)]
pub async fn delete_task(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let deleted = Task::delete(&state.db, user.id, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Task not found".into()));
    }

    info!(task_id = %id, user_id = %user.id, "task deleted");
    Ok(Json(ApiResponse::message("Task deleted successfully")))
}
