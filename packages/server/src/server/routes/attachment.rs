use axum::{
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};

pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
pub const TXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Text body served as a file download
pub fn attachment(content_type: &str, filename: &str, body: String) -> Response {
    (
        [
            (CONTENT_TYPE, content_type.to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response()
}
