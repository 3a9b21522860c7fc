use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use crate::common::{AuthError, Principal};
use crate::server::app::AppState;
use crate::server::error::ApiError;

/// Header carrying the admin secret for taxonomy mutations
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Bearer token from the Authorization header, if any
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let auth_str = headers.get(AUTHORIZATION)?.to_str().ok()?;
    auth_str
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Extractor for routes that need a logged-in admin.
///
/// Rejects with 401 when the bearer token is missing or unknown to the
/// token store.
#[derive(Debug, Clone)]
pub struct RequireAuth {
    pub principal: Principal,
    pub token: String,
}

#[async_trait]
impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(AuthError::MissingCredential)?;

        let principal = state
            .token_store
            .validate(token)
            .await
            .ok_or(AuthError::InvalidCredential)?;

        Ok(RequireAuth {
            principal,
            token: token.to_string(),
        })
    }
}

/// Bearer gate plus the `X-Admin-Token` secret check.
#[derive(Debug, Clone)]
pub struct RequireAdmin {
    pub principal: Principal,
}

#[async_trait]
impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = RequireAuth::from_request_parts(parts, state).await?;

        let secret = parts
            .headers
            .get(ADMIN_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .ok_or(AuthError::MissingAdminSecret)?;

        if secret != &*state.admin_password {
            tracing::warn!(user_id = %auth.principal.user_id, "Admin secret mismatch");
            return Err(AuthError::InvalidAdminSecret.into());
        }

        Ok(RequireAdmin {
            principal: auth.principal,
        })
    }
}
