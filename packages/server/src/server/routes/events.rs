use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use chrono::Local;
use serde::Deserialize;

use crate::common::filters::{non_blank, parse_date_param};
use crate::common::{DateRange, EventId};
use crate::domains::events::{
    Event, EventDetail, EventInput, EventListItem, EventRosterRow, RosterEntry,
};
use crate::domains::reports::export::event_txt;
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::extract::JsonBody;
use crate::server::middleware::RequireAuth;
use crate::server::routes::admin::MessageResponse;
use crate::server::routes::attachment::{attachment, TXT_CONTENT_TYPE};

#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub q: Option<String>,
}

impl RangeQuery {
    /// `Some` only when both bounds are given
    fn range(&self) -> ApiResult<Option<DateRange>> {
        let from = parse_date_param("from", self.from.as_deref())?;
        let to = parse_date_param("to", self.to.as_deref())?;
        Ok(DateRange::from_bounds(from, to)?)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBody {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub task: Option<String>,
    #[serde(default)]
    pub remark: Option<String>,
    #[serde(default)]
    pub member_ids: Vec<RosterEntry>,
}

impl EventBody {
    fn into_input(self) -> ApiResult<EventInput> {
        let date = parse_date_param("date", self.date.as_deref())?
            .ok_or_else(|| ApiError::validation("date and title are required"))?;
        let title = non_blank(self.title)
            .ok_or_else(|| ApiError::validation("date and title are required"))?;

        Ok(EventInput::new(
            date,
            title,
            self.task,
            self.remark,
            self.member_ids,
        ))
    }
}

fn event_not_found(id: EventId) -> ApiError {
    ApiError::not_found(format!("Event {} not found", id))
}

/// Event list with participant counts. Without both bounds the list covers
/// the year ending today.
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> ApiResult<Json<Vec<EventListItem>>> {
    let range = query
        .range()?
        .unwrap_or_else(|| DateRange::trailing_year(Local::now().date_naive()));
    let title = non_blank(query.q);

    let events = Event::list(range, title.as_deref(), &state.db_pool).await?;
    Ok(Json(events))
}

/// Flattened (event, member) rows; full history unless both bounds are given
pub async fn list_events_in_range(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> ApiResult<Json<Vec<EventRosterRow>>> {
    let rows = Event::list_with_members(query.range()?, &state.db_pool).await?;
    Ok(Json(rows))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<EventId>,
) -> ApiResult<Json<EventDetail>> {
    Event::find_detail(id, &state.db_pool)
        .await?
        .map(Json)
        .ok_or_else(|| event_not_found(id))
}

pub async fn create_event(
    State(state): State<AppState>,
    _auth: RequireAuth,
    JsonBody(body): JsonBody<EventBody>,
) -> ApiResult<(StatusCode, Json<EventDetail>)> {
    let input = body.into_input()?;
    let detail = Event::create(&input, &state.db_pool).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

pub async fn update_event(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Path(id): Path<EventId>,
    JsonBody(body): JsonBody<EventBody>,
) -> ApiResult<Json<EventDetail>> {
    let input = body.into_input()?;
    Event::update(id, &input, &state.db_pool)
        .await?
        .map(Json)
        .ok_or_else(|| event_not_found(id))
}

pub async fn delete_event(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Path(id): Path<EventId>,
) -> ApiResult<Json<MessageResponse>> {
    if !Event::delete(id, &state.db_pool).await? {
        return Err(event_not_found(id));
    }
    Ok(MessageResponse::new("Event deleted"))
}

pub async fn export_event_txt(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Path(id): Path<EventId>,
) -> ApiResult<Response> {
    let detail = Event::find_detail(id, &state.db_pool)
        .await?
        .ok_or_else(|| event_not_found(id))?;

    let filename = format!("event_{}_{}.txt", detail.event.id, detail.event.date);
    Ok(attachment(TXT_CONTENT_TYPE, &filename, event_txt(&detail)))
}
