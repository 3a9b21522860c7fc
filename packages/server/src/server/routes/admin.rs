use axum::{extract::State, http::HeaderMap, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::common::{AuthError, Principal};
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::extract::JsonBody;
use crate::server::middleware::bearer_token;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub message: String,
    pub role: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

/// Exchange the admin password for a bearer token
pub async fn login_handler(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let password = body
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::validation("password is required"))?;

    if password != *state.admin_password {
        info!("Admin login rejected");
        return Err(AuthError::InvalidCredential.into());
    }

    let token = state.token_store.issue(Principal::admin()).await;
    info!("Admin logged in");

    Ok(Json(LoginResponse {
        token,
        message: "Login successful".to_string(),
        role: "admin",
    }))
}

/// Revoke the presented token. Succeeds whether or not it was live.
pub async fn logout_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<MessageResponse> {
    if let Some(token) = bearer_token(&headers) {
        state.token_store.revoke(token).await;
    }

    MessageResponse::new("Logged out")
}
