use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::common::{EventId, MemberId, ParticipationFilter};
use crate::domains::events::Event;
use crate::domains::members::Member;

/// One qualifying (event, member) pair of the flat report
#[derive(Debug, Clone, Serialize, PartialEq, Eq, sqlx::FromRow)]
pub struct ReportRow {
    pub event_id: EventId,
    pub date: NaiveDate,
    pub title: String,
    pub task: String,
    pub event_remark: String,
    pub member_id: MemberId,
    pub member_name: String,
    pub member_note: Option<String>,
}

impl ReportRow {
    /// Ordered by date, event id, member id
    pub async fn query(filter: &ParticipationFilter, pool: &SqlitePool) -> Result<Vec<Self>> {
        let mut qb = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT
                e.id AS event_id,
                e.date,
                e.title,
                e.task,
                e.remark AS event_remark,
                m.id AS member_id,
                m.name AS member_name,
                em.note AS member_note
            FROM events e
            JOIN event_members em ON e.id = em.event_id
            JOIN members m ON em.member_id = m.id
            WHERE 1=1
            "#,
        );
        filter.push_conditions(&mut qb);
        qb.push(" ORDER BY e.date ASC, e.id ASC, m.id ASC");

        qb.build_query_as::<Self>()
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }
}

/// Headline counts for the dashboard
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_members: i64,
    pub total_events: i64,
}

impl Stats {
    pub async fn load(pool: &SqlitePool) -> Result<Self> {
        Ok(Self {
            total_members: Member::count(pool).await?,
            total_events: Event::count(pool).await?,
        })
    }
}
