use axum::{
    extract::{Query, State},
    response::Response,
    Json,
};
use serde::Deserialize;

use crate::common::filters::{non_blank, parse_date_param, parse_member_ids};
use crate::common::{DateRange, ParticipationFilter};
use crate::domains::reports::export::{report_csv, task_participation_csv};
use crate::domains::reports::{
    MemberSummaryTable, MemberTaskCount, ReportRow, Stats, TaskParticipation,
};
use crate::server::app::AppState;
use crate::server::error::ApiResult;
use crate::server::middleware::RequireAuth;
use crate::server::routes::attachment::{attachment, CSV_CONTENT_TYPE};

/// Query string shared by every report endpoint. Each endpoint reads the
/// subset it documents; unknown parameters are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub title_like: Option<String>,
    pub task_name: Option<String>,
    /// Comma-separated member ids
    pub member_ids: Option<String>,
}

impl ReportQuery {
    fn filter(self) -> ApiResult<ParticipationFilter> {
        let from = parse_date_param("from", self.from.as_deref())?;
        let to = parse_date_param("to", self.to.as_deref())?;

        Ok(ParticipationFilter {
            range: DateRange::from_bounds(from, to)?,
            task: non_blank(self.task_name),
            title_like: non_blank(self.title_like),
            member_ids: parse_member_ids(self.member_ids.as_deref()),
        })
    }
}

pub async fn stats(State(state): State<AppState>, _auth: RequireAuth) -> ApiResult<Json<Stats>> {
    Ok(Json(Stats::load(&state.db_pool).await?))
}

/// Flat (event, member) CSV filtered by date range, title and members
pub async fn export_csv(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Response> {
    let filter = ParticipationFilter {
        task: None,
        ..query.filter()?
    };

    let rows = ReportRow::query(&filter, &state.db_pool).await?;
    Ok(attachment(CSV_CONTENT_TYPE, "report.csv", report_csv(&rows)))
}

pub async fn task_participation(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Json<Vec<TaskParticipation>>> {
    let filter = ParticipationFilter {
        title_like: None,
        ..query.filter()?
    };

    Ok(Json(TaskParticipation::query(&filter, &state.db_pool).await?))
}

pub async fn export_task_participation_csv(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Response> {
    let filter = ParticipationFilter {
        title_like: None,
        ..query.filter()?
    };

    let rows = TaskParticipation::query(&filter, &state.db_pool).await?;
    let filename = format!(
        "task_participation_{}.csv",
        DateRange::file_label(filter.range.as_ref())
    );

    Ok(attachment(CSV_CONTENT_TYPE, &filename, task_participation_csv(&rows)))
}

pub async fn member_participation_summary(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Json<Vec<MemberTaskCount>>> {
    let filter = ParticipationFilter {
        task: None,
        title_like: None,
        ..query.filter()?
    };

    Ok(Json(MemberTaskCount::query(&filter, &state.db_pool).await?))
}

/// Member x task matrix, one column per task seen in the filtered data
pub async fn export_member_summary_csv(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Response> {
    let filter = ParticipationFilter {
        task: None,
        title_like: None,
        ..query.filter()?
    };

    let counts = MemberTaskCount::query(&filter, &state.db_pool).await?;
    let table = MemberSummaryTable::pivot(&counts);
    let filename = format!(
        "member_summary_{}.csv",
        DateRange::file_label(filter.range.as_ref())
    );

    Ok(attachment(CSV_CONTENT_TYPE, &filename, table.to_csv()))
}
