use anyhow::Result;
use serde::Serialize;
use sqlx::{Executor, QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use tracing::info;

use crate::common::{EventId, MemberId};
use crate::domains::events::data::RosterSlot;

/// Roster row joined with the member it references
#[derive(Debug, Clone, Serialize, PartialEq, Eq, sqlx::FromRow)]
pub struct RosterMember {
    pub id: MemberId,
    pub name: String,
    pub note: Option<String>,
    pub sort_order: i64,
}

/// Join-table operations on `event_members`
pub struct EventMember;

impl EventMember {
    /// Roster of one event ordered by member id
    pub async fn roster<'e, E>(
        event_id: EventId,
        executor: E,
    ) -> Result<Vec<RosterMember>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, RosterMember>(
            r#"
            SELECT m.id, m.name, em.note, em.sort_order
            FROM event_members em
            JOIN members m ON em.member_id = m.id
            WHERE em.event_id = ?
            ORDER BY m.id
            "#,
        )
        .bind(event_id)
        .fetch_all(executor)
        .await
    }

    /// Ids from `ids` with no matching member row, in input order
    pub async fn missing_members(
        ids: &[MemberId],
        conn: &mut SqliteConnection,
    ) -> Result<Vec<MemberId>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut qb = QueryBuilder::<Sqlite>::new("SELECT id FROM members WHERE id IN (");
        let mut separated = qb.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let found: Vec<MemberId> = qb
            .build_query_scalar::<MemberId>()
            .fetch_all(&mut *conn)
            .await?;

        Ok(ids
            .iter()
            .filter(|id| !found.contains(id))
            .copied()
            .collect())
    }

    /// Delete every roster row of the event and insert `slots` in order.
    /// `sort_order` is the 1-based position in `slots`.
    ///
    /// Must run inside the caller's transaction.
    pub async fn replace_roster(
        event_id: EventId,
        slots: &[RosterSlot],
        conn: &mut SqliteConnection,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM event_members WHERE event_id = ?")
            .bind(event_id)
            .execute(&mut *conn)
            .await?;

        for (position, slot) in slots.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO event_members (event_id, member_id, note, sort_order)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(event_id)
            .bind(slot.member_id)
            .bind(&slot.note)
            .bind(position as i64 + 1)
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }

    /// Renumber rosters that still carry the default `sort_order` of 0.
    ///
    /// Each affected event gets 1..n by ascending member id in a single
    /// statement. Returns how many events were (or, with `dry_run`, would
    /// be) renumbered.
    pub async fn backfill_sort_order(dry_run: bool, pool: &SqlitePool) -> Result<u64> {
        let event_ids: Vec<EventId> = sqlx::query_scalar(
            "SELECT DISTINCT event_id FROM event_members WHERE sort_order = 0 ORDER BY event_id",
        )
        .fetch_all(pool)
        .await?;

        if dry_run {
            return Ok(event_ids.len() as u64);
        }

        for event_id in &event_ids {
            // (event_id, member_id) is unique, so the rank is the position
            let result = sqlx::query(
                r#"
                UPDATE event_members
                SET sort_order = (
                    SELECT COUNT(*) FROM event_members AS other
                    WHERE other.event_id = event_members.event_id
                      AND other.member_id <= event_members.member_id
                )
                WHERE event_id = ?
                "#,
            )
            .bind(*event_id)
            .execute(pool)
            .await?;

            info!(
                event_id = %event_id,
                rows = result.rows_affected(),
                "Roster sort order backfilled"
            );
        }

        Ok(event_ids.len() as u64)
    }
}
