use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::common::{MemberId, ParticipationFilter};

/// Shared FROM/WHERE for both aggregates: only events with a task count.
const PARTICIPATION_SOURCE: &str = r#"
    FROM events e
    JOIN event_members em ON e.id = em.event_id
    JOIN members m ON em.member_id = m.id
    WHERE e.task IS NOT NULL AND e.task != ''
"#;

/// Participation of one member in one task
#[derive(Debug, Clone, Serialize, PartialEq, Eq, sqlx::FromRow)]
pub struct TaskParticipation {
    pub task: String,
    pub member_id: MemberId,
    pub member_name: String,
    /// Distinct qualifying events
    pub participation_count: i64,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
}

impl TaskParticipation {
    /// One row per (task, member) with at least one qualifying event, ordered
    /// by task, then count descending, then member name. Member id breaks any
    /// remaining tie.
    pub async fn query(filter: &ParticipationFilter, pool: &SqlitePool) -> Result<Vec<Self>> {
        let mut qb = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT
                e.task AS task,
                m.id AS member_id,
                m.name AS member_name,
                COUNT(DISTINCT e.id) AS participation_count,
                MIN(e.date) AS first_date,
                MAX(e.date) AS last_date
            "#,
        );
        qb.push(PARTICIPATION_SOURCE);
        filter.push_conditions(&mut qb);
        qb.push(
            " GROUP BY e.task, m.id \
             ORDER BY e.task ASC, participation_count DESC, m.name ASC, m.id ASC",
        );

        qb.build_query_as::<Self>()
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }
}

/// Long-format member x task count; `export::MemberSummaryTable` pivots it
#[derive(Debug, Clone, Serialize, PartialEq, Eq, sqlx::FromRow)]
pub struct MemberTaskCount {
    pub member_id: MemberId,
    pub member_name: String,
    pub task: String,
    pub task_count: i64,
}

impl MemberTaskCount {
    /// Ordered by member id, then task
    pub async fn query(filter: &ParticipationFilter, pool: &SqlitePool) -> Result<Vec<Self>> {
        let mut qb = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT
                m.id AS member_id,
                m.name AS member_name,
                e.task AS task,
                COUNT(DISTINCT e.id) AS task_count
            "#,
        );
        qb.push(PARTICIPATION_SOURCE);
        filter.push_conditions(&mut qb);
        qb.push(" GROUP BY m.id, e.task ORDER BY m.id ASC, e.task ASC");

        qb.build_query_as::<Self>()
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }
}
