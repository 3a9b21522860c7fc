// HTTP server setup (Axum + REST)
pub mod app;
pub mod auth;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;

pub use app::*;
pub use error::{ApiError, ApiResult};
pub use extract::JsonBody;
