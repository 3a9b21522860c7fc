//! Request body extraction with `ApiError` rejections.

use axum::extract::FromRequest;

use crate::server::error::ApiError;

/// `axum::Json` whose failures render as a `validation` error body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
