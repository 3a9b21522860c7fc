//! Query filters shared by the event listing and the reporting queries.

use chrono::{Months, NaiveDate};
use sqlx::{QueryBuilder, Sqlite};
use thiserror::Error;

use super::MemberId;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FilterError {
    #[error("{field} must be an ISO date (YYYY-MM-DD), got {value:?}")]
    InvalidDate { field: &'static str, value: String },

    #[error("from ({from}) must not be after to ({to})")]
    InvertedRange { from: NaiveDate, to: NaiveDate },
}

/// Inclusive calendar date range, compared against `events.date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// Builds a range only when both bounds are present.
    pub fn from_bounds(
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Option<Self>, FilterError> {
        match (from, to) {
            (Some(from), Some(to)) if from > to => Err(FilterError::InvertedRange { from, to }),
            (Some(from), Some(to)) => Ok(Some(Self { from, to })),
            _ => Ok(None),
        }
    }

    /// The year ending on `today`, both ends inclusive.
    pub fn trailing_year(today: NaiveDate) -> Self {
        let from = today
            .checked_sub_months(Months::new(12))
            .unwrap_or(NaiveDate::MIN);
        Self { from, to: today }
    }

    /// Appends ` AND <column> BETWEEN ? AND ?` with both bounds bound.
    pub fn push_condition(&self, qb: &mut QueryBuilder<'_, Sqlite>, column: &str) {
        qb.push(" AND ")
            .push(column)
            .push(" BETWEEN ")
            .push_bind(self.from)
            .push(" AND ")
            .push_bind(self.to);
    }

    /// `from_to` fragment used in export filenames.
    pub fn file_label(range: Option<&Self>) -> String {
        match range {
            Some(r) => format!("{}_{}", r.from, r.to),
            None => "all_all".to_string(),
        }
    }
}

/// Filter for the participation aggregates and the flat report export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipationFilter {
    pub range: Option<DateRange>,
    /// Exact match on `events.task`.
    pub task: Option<String>,
    /// Substring match on `events.title`.
    pub title_like: Option<String>,
    pub member_ids: Vec<MemberId>,
}

impl ParticipationFilter {
    /// Appends every active condition. The builder must already contain a
    /// `WHERE` clause.
    pub fn push_conditions(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        if let Some(range) = &self.range {
            range.push_condition(qb, "e.date");
        }

        if let Some(task) = &self.task {
            qb.push(" AND e.task = ").push_bind(task.clone());
        }

        if let Some(title) = &self.title_like {
            qb.push(" AND e.title LIKE ")
                .push_bind(format!("%{}%", title));
        }

        if !self.member_ids.is_empty() {
            qb.push(" AND m.id IN (");
            let mut separated = qb.separated(", ");
            for id in &self.member_ids {
                separated.push_bind(*id);
            }
            separated.push_unseparated(")");
        }
    }
}

/// Parses an optional ISO date query parameter. Blank values count as absent.
pub fn parse_date_param(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<NaiveDate>, FilterError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| FilterError::InvalidDate {
                field,
                value: value.to_string(),
            }),
    }
}

/// Parses a comma-separated member id list. Tokens that are not integers are
/// dropped silently; duplicates are kept once.
pub fn parse_member_ids(raw: Option<&str>) -> Vec<MemberId> {
    let mut ids: Vec<MemberId> = Vec::new();
    for token in raw.unwrap_or_default().split(',') {
        if let Ok(id) = MemberId::parse(token) {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }
    ids
}

/// Trims a text parameter and drops it when empty.
pub fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
