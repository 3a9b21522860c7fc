use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::common::TaskDefinitionId;
use crate::domains::tasks::{TaskDefinition, TaskInput};
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::extract::JsonBody;
use crate::server::middleware::RequireAdmin;
use crate::server::routes::admin::MessageResponse;

#[derive(Debug, Deserialize)]
pub struct TaskBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i64>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl TaskBody {
    fn into_input(self) -> ApiResult<TaskInput> {
        TaskInput::new(
            self.name.as_deref(),
            self.category,
            self.description,
            self.sort_order,
            self.is_active,
        )
        .ok_or_else(|| ApiError::validation("name is required"))
    }
}

fn task_not_found(id: TaskDefinitionId) -> ApiError {
    ApiError::not_found(format!("Task {} not found", id))
}

pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<TaskDefinition>>> {
    Ok(Json(TaskDefinition::list_active(&state.db_pool).await?))
}

pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(TaskDefinition::categories(&state.db_pool).await?))
}

pub async fn create_task(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    JsonBody(body): JsonBody<TaskBody>,
) -> ApiResult<(StatusCode, Json<TaskDefinition>)> {
    // New definitions always start active
    let input = TaskBody {
        is_active: None,
        ..body
    }
    .into_input()?;

    let task = TaskDefinition::create(&input, &state.db_pool).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn update_task(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<TaskDefinitionId>,
    JsonBody(body): JsonBody<TaskBody>,
) -> ApiResult<Json<TaskDefinition>> {
    let input = body.into_input()?;
    TaskDefinition::update(id, &input, &state.db_pool)
        .await?
        .map(Json)
        .ok_or_else(|| task_not_found(id))
}

/// Soft delete; the row stays so historical events keep their task name
pub async fn delete_task(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<TaskDefinitionId>,
) -> ApiResult<Json<MessageResponse>> {
    if !TaskDefinition::deactivate(id, &state.db_pool).await? {
        return Err(task_not_found(id));
    }
    Ok(MessageResponse::new("Task deactivated"))
}
