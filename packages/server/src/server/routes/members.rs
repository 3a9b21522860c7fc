use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::common::MemberId;
use crate::domains::members::{ImportReport, Member, MemberInput};
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::extract::JsonBody;
use crate::server::middleware::RequireAuth;
use crate::server::routes::admin::MessageResponse;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MemberBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub remark: Option<String>,
}

impl MemberBody {
    fn into_input(self) -> ApiResult<MemberInput> {
        MemberInput::new(self.name.as_deref(), self.remark.as_deref())
            .ok_or_else(|| ApiError::validation("name is required"))
    }
}

pub async fn list_members(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<Member>>> {
    let members = Member::search(query.search.as_deref(), &state.db_pool).await?;
    Ok(Json(members))
}

pub async fn create_member(
    State(state): State<AppState>,
    _auth: RequireAuth,
    JsonBody(body): JsonBody<MemberBody>,
) -> ApiResult<(StatusCode, Json<Member>)> {
    let input = body.into_input()?;
    let member = Member::create(&input, &state.db_pool).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

pub async fn update_member(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Path(id): Path<MemberId>,
    JsonBody(body): JsonBody<MemberBody>,
) -> ApiResult<Json<Member>> {
    let input = body.into_input()?;
    Member::update(id, &input, &state.db_pool)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Member {} not found", id)))
}

pub async fn delete_member(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Path(id): Path<MemberId>,
) -> ApiResult<Json<MessageResponse>> {
    if !Member::delete(id, &state.db_pool).await? {
        return Err(ApiError::not_found(format!("Member {} not found", id)));
    }
    Ok(MessageResponse::new("Member deleted"))
}

/// Bulk upsert: `{"members": [{"id"?, "name", "remark"?}, ...]}`
pub async fn import_members(
    State(state): State<AppState>,
    _auth: RequireAuth,
    JsonBody(body): JsonBody<Value>,
) -> ApiResult<Json<ImportReport>> {
    let rows = match body.get("members") {
        Some(Value::Array(rows)) => rows.clone(),
        _ => return Err(ApiError::validation("members must be an array")),
    };

    let report = Member::import(rows, &state.db_pool).await;
    Ok(Json(report))
}
