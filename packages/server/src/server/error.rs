//! HTTP error boundary.
//!
//! Every handler returns `Result<_, ApiError>`. Domain errors convert through
//! `From` so handlers can use `?` directly; the response body is always
//! `{"error": <message>, "code": <kind>}`.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::common::{AuthError, FilterError};
use crate::domains::events::EventWriteError;
use crate::domains::tasks::TaskError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    MissingCredential(String),

    #[error("{0}")]
    InvalidCredential(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MissingCredential(_) | Self::InvalidCredential(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::AlreadyExists(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable kind
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::MissingCredential(_) => "missing_credential",
            Self::InvalidCredential(_) => "invalid_credential",
            Self::Forbidden(_) => "forbidden",
            Self::AlreadyExists(_) => "already_exists",
            Self::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(err) = &self {
            tracing::error!(error = ?err, "Request failed");
        }

        let body = Json(serde_json::json!({
            "error": self.to_string(),
            "code": self.code(),
        }));

        (self.status(), body).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredential | AuthError::MissingAdminSecret => {
                Self::MissingCredential(err.to_string())
            }
            AuthError::InvalidCredential => Self::InvalidCredential(err.to_string()),
            AuthError::InvalidAdminSecret => Self::Forbidden(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<FilterError> for ApiError {
    fn from(err: FilterError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<EventWriteError> for ApiError {
    fn from(err: EventWriteError) -> Self {
        match err {
            EventWriteError::UnknownMembers(_) => Self::Validation(err.to_string()),
            EventWriteError::Database(e) => Self::Internal(e.into()),
        }
    }
}

impl From<TaskError> for ApiError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::NameTaken(_) => Self::AlreadyExists(err.to_string()),
            TaskError::Database(e) => Self::Internal(e.into()),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
