use anyhow::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use thiserror::Error;

use crate::common::TaskDefinitionId;
use crate::domains::tasks::data::TaskInput;

/// Task definition model - SQL persistence layer
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskDefinition {
    pub id: TaskDefinitionId,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    pub sort_order: i64,
    pub created_at: NaiveDateTime,
}

/// Write failures callers must tell apart
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Task name already exists: {0}")]
    NameTaken(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl TaskError {
    /// Maps a unique-constraint violation on `name` to `NameTaken`
    fn from_write(error: sqlx::Error, name: &str) -> Self {
        match &error {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Self::NameTaken(name.to_string())
            }
            _ => Self::Database(error),
        }
    }
}

impl TaskDefinition {
    /// Active definitions in display order
    pub async fn list_active(pool: &SqlitePool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM task_definitions
            WHERE is_active = 1
            ORDER BY sort_order ASC, name ASC
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Distinct categories of active definitions
    pub async fn categories(pool: &SqlitePool) -> Result<Vec<String>> {
        sqlx::query_scalar(
            r#"
            SELECT DISTINCT category
            FROM task_definitions
            WHERE is_active = 1 AND category IS NOT NULL
            ORDER BY category ASC
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: TaskDefinitionId, pool: &SqlitePool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM task_definitions WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn create(input: &TaskInput, pool: &SqlitePool) -> Result<Self, TaskError> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO task_definitions (name, category, description, sort_order, is_active)
            VALUES (?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(&input.category)
        .bind(&input.description)
        .bind(input.sort_order)
        .bind(input.is_active)
        .fetch_one(pool)
        .await
        .map_err(|e| TaskError::from_write(e, &input.name))
    }

    /// Returns `None` when no definition has this id
    pub async fn update(
        id: TaskDefinitionId,
        input: &TaskInput,
        pool: &SqlitePool,
    ) -> Result<Option<Self>, TaskError> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE task_definitions
            SET name = ?, category = ?, description = ?, sort_order = ?, is_active = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(&input.category)
        .bind(&input.description)
        .bind(input.sort_order)
        .bind(input.is_active)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| TaskError::from_write(e, &input.name))
    }

    /// Soft delete. Returns whether a definition with this id exists.
    pub async fn deactivate(id: TaskDefinitionId, pool: &SqlitePool) -> Result<bool> {
        let result = sqlx::query("UPDATE task_definitions SET is_active = 0 WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
