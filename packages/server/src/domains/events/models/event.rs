use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use thiserror::Error;
use tracing::debug;

use super::event_member::{EventMember, RosterMember};
use crate::common::{DateRange, EventId, MemberId};
use crate::domains::events::data::EventInput;

/// Event model - SQL persistence layer
///
/// `task` is free text. It usually names a task definition but is never
/// foreign-keyed to one, so deactivated task names keep displaying.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Event {
    pub id: EventId,
    pub date: NaiveDate,
    pub title: String,
    pub task: String,
    pub remark: String,
    pub created_at: NaiveDateTime,
}

/// Event row as shown in the event list
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct EventListItem {
    pub id: EventId,
    pub date: NaiveDate,
    pub title: String,
    pub task: String,
    pub remark: String,
    pub created_at: NaiveDateTime,
    pub member_count: i64,
}

/// Event with its full roster
#[derive(Debug, Clone, Serialize)]
pub struct EventDetail {
    #[serde(flatten)]
    pub event: Event,
    pub members: Vec<RosterMember>,
}

/// One (event, member) pair; member columns are null for events without a
/// roster
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct EventRosterRow {
    pub event_id: EventId,
    pub date: NaiveDate,
    pub title: String,
    pub task: String,
    pub remark: String,
    pub member_id: Option<MemberId>,
    pub member_name: Option<String>,
    pub member_note: Option<String>,
}

/// Failures a caller has to tell apart when writing an event
#[derive(Error, Debug)]
pub enum EventWriteError {
    #[error("Unknown member ids: {}", join_ids(.0))]
    UnknownMembers(Vec<MemberId>),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

fn join_ids(ids: &[MemberId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl Event {
    pub async fn find_by_id(id: EventId, pool: &SqlitePool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM events WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Event plus roster ordered by member id
    pub async fn find_detail(id: EventId, pool: &SqlitePool) -> Result<Option<EventDetail>> {
        let Some(event) = Self::find_by_id(id, pool).await? else {
            return Ok(None);
        };

        let members = EventMember::roster(id, pool).await?;

        Ok(Some(EventDetail { event, members }))
    }

    /// Events dated inside `range` with their participant counts, newest
    /// first. `title_like` is a substring match.
    pub async fn list(
        range: DateRange,
        title_like: Option<&str>,
        pool: &SqlitePool,
    ) -> Result<Vec<EventListItem>> {
        let mut qb = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT
                e.id,
                e.date,
                e.title,
                e.task,
                e.remark,
                e.created_at,
                COUNT(em.member_id) AS member_count
            FROM events e
            LEFT JOIN event_members em ON e.id = em.event_id
            WHERE 1=1
            "#,
        );

        range.push_condition(&mut qb, "e.date");

        if let Some(title) = title_like {
            qb.push(" AND e.title LIKE ").push_bind(format!("%{}%", title));
        }

        qb.push(" GROUP BY e.id ORDER BY e.date DESC, e.id DESC");

        qb.build_query_as::<EventListItem>()
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Flattened (event, member) rows. Events with an empty roster appear
    /// once with null member columns.
    pub async fn list_with_members(
        range: Option<DateRange>,
        pool: &SqlitePool,
    ) -> Result<Vec<EventRosterRow>> {
        let mut qb = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT
                e.id AS event_id,
                e.date,
                e.title,
                e.task,
                e.remark,
                m.id AS member_id,
                m.name AS member_name,
                em.note AS member_note
            FROM events e
            LEFT JOIN event_members em ON e.id = em.event_id
            LEFT JOIN members m ON em.member_id = m.id
            WHERE 1=1
            "#,
        );

        if let Some(range) = range {
            range.push_condition(&mut qb, "e.date");
        }

        qb.push(" ORDER BY e.date DESC, e.id, m.id");

        qb.build_query_as::<EventRosterRow>()
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert an event and its roster atomically
    pub async fn create(
        input: &EventInput,
        pool: &SqlitePool,
    ) -> Result<EventDetail, EventWriteError> {
        let mut tx = pool.begin().await?;

        // Write before reading so the transaction takes the write lock up
        // front instead of upgrading a read snapshot
        let event = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO events (date, title, task, remark)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(input.date)
        .bind(&input.title)
        .bind(&input.task)
        .bind(&input.remark)
        .fetch_one(&mut *tx)
        .await?;

        let missing = EventMember::missing_members(&input.member_ids(), &mut tx).await?;
        if !missing.is_empty() {
            // Dropping the transaction rolls the insert back
            return Err(EventWriteError::UnknownMembers(missing));
        }

        EventMember::replace_roster(event.id, &input.roster, &mut tx).await?;
        let members = EventMember::roster(event.id, &mut *tx).await?;

        tx.commit().await?;

        debug!(event_id = %event.id, members = members.len(), "Event created");

        Ok(EventDetail { event, members })
    }

    /// Update an event and replace its whole roster in one transaction.
    /// Returns `None` (and changes nothing) when the event does not exist.
    pub async fn update(
        id: EventId,
        input: &EventInput,
        pool: &SqlitePool,
    ) -> Result<Option<EventDetail>, EventWriteError> {
        let mut tx = pool.begin().await?;

        let event = sqlx::query_as::<_, Self>(
            r#"
            UPDATE events
            SET date = ?, title = ?, task = ?, remark = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(input.date)
        .bind(&input.title)
        .bind(&input.task)
        .bind(&input.remark)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(event) = event else {
            return Ok(None);
        };

        let missing = EventMember::missing_members(&input.member_ids(), &mut tx).await?;
        if !missing.is_empty() {
            // Dropping the transaction rolls the event update back
            return Err(EventWriteError::UnknownMembers(missing));
        }

        EventMember::replace_roster(event.id, &input.roster, &mut tx).await?;
        let members = EventMember::roster(event.id, &mut *tx).await?;

        tx.commit().await?;

        debug!(event_id = %event.id, members = members.len(), "Event updated");

        Ok(Some(EventDetail { event, members }))
    }

    /// Delete an event; its roster rows cascade. Returns whether a row was
    /// removed.
    pub async fn delete(id: EventId, pool: &SqlitePool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM events")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
