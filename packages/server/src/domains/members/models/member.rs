use anyhow::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::debug;

use crate::common::MemberId;
use crate::domains::members::data::{ImportReport, MemberImportRow, MemberInput};

/// Member model - SQL persistence layer
///
/// Names are not unique; the surrogate id is the only identity.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub remark: String,
    pub created_at: NaiveDateTime,
}

impl Member {
    /// Find member by ID
    pub async fn find_by_id(id: MemberId, pool: &SqlitePool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM members WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// List members, optionally filtered by a substring of the name or of the
    /// id rendered as text
    pub async fn search(term: Option<&str>, pool: &SqlitePool) -> Result<Vec<Self>> {
        match term.map(str::trim).filter(|t| !t.is_empty()) {
            Some(term) => {
                let pattern = format!("%{}%", term);
                sqlx::query_as::<_, Self>(
                    r#"
                    SELECT * FROM members
                    WHERE CAST(id AS TEXT) LIKE ? OR name LIKE ?
                    ORDER BY id
                    "#,
                )
                .bind(&pattern)
                .bind(&pattern)
                .fetch_all(pool)
                .await
                .map_err(Into::into)
            }
            None => sqlx::query_as::<_, Self>("SELECT * FROM members ORDER BY id")
                .fetch_all(pool)
                .await
                .map_err(Into::into),
        }
    }

    /// Insert new member
    pub async fn create(input: &MemberInput, pool: &SqlitePool) -> Result<Self> {
        sqlx::query_as::<_, Self>("INSERT INTO members (name, remark) VALUES (?, ?) RETURNING *")
            .bind(&input.name)
            .bind(&input.remark)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    /// Rename / edit remark. Returns `None` when the member does not exist.
    pub async fn update(
        id: MemberId,
        input: &MemberInput,
        pool: &SqlitePool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE members SET name = ?, remark = ? WHERE id = ? RETURNING *",
        )
        .bind(&input.name)
        .bind(&input.remark)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Delete a member. Its participation rows go with it through the
    /// `event_members` foreign key. Returns whether a row was removed.
    pub async fn delete(id: MemberId, pool: &SqlitePool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM members WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM members")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Bulk upsert keyed on id presence.
    ///
    /// Every row is applied on its own; a bad row is recorded in the report
    /// and the rest of the batch carries on. Row numbers are 1-based.
    pub async fn import(rows: Vec<serde_json::Value>, pool: &SqlitePool) -> ImportReport {
        let mut report = ImportReport::default();

        for (index, raw) in rows.into_iter().enumerate() {
            let row_number = index + 1;

            let row: MemberImportRow = match serde_json::from_value(raw) {
                Ok(row) => row,
                Err(e) => {
                    report.fail(row_number, format!("malformed row ({})", e));
                    continue;
                }
            };

            let Some(input) = MemberInput::new(row.name.as_deref(), row.remark.as_deref()) else {
                report.fail(row_number, "name is required");
                continue;
            };

            match row.id {
                Some(id) => match Self::update(id, &input, pool).await {
                    Ok(Some(_)) => report.updated += 1,
                    Ok(None) => report.fail(row_number, format!("ID {} does not exist", id)),
                    Err(e) => report.fail(row_number, e),
                },
                None => match Self::create(&input, pool).await {
                    Ok(_) => report.inserted += 1,
                    Err(e) => report.fail(row_number, e),
                },
            }
        }

        debug!(
            inserted = report.inserted,
            updated = report.updated,
            failed = report.failed,
            "Member import finished"
        );

        report
    }
}
