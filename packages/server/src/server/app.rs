//! Application setup and server configuration.

use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, Method,
    },
    routing::{get, post, put},
    Router,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::kernel::TokenStore;
use crate::server::auth::InMemoryTokenStore;
use crate::server::middleware::ADMIN_TOKEN_HEADER;
use crate::server::routes::{admin, events, health, members, reports, tasks};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub token_store: Arc<dyn TokenStore>,
    /// Login password and `X-Admin-Token` secret
    pub admin_password: Arc<str>,
}

impl AppState {
    /// State backed by the in-memory token store
    pub fn new(db_pool: SqlitePool, admin_password: impl Into<Arc<str>>) -> Self {
        Self {
            db_pool,
            token_store: Arc::new(InMemoryTokenStore::new()),
            admin_password: admin_password.into(),
        }
    }
}

/// Open the SQLite database, creating the file when missing. Foreign keys are
/// switched on for every connection so roster rows follow their parents.
pub async fn connect_pool(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid DATABASE_URL: {}", database_url))?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .context("Failed to connect to database")
}

/// Apply pending schema migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run migrations")
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    // CORS configuration - the console is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static(ADMIN_TOKEN_HEADER),
        ]);

    let api = Router::new()
        // Admin session
        .route("/admin/login", post(admin::login_handler))
        .route("/admin/logout", post(admin::logout_handler))
        // Members
        .route(
            "/members",
            get(members::list_members).post(members::create_member),
        )
        .route("/members/import-json", post(members::import_members))
        .route(
            "/members/:id",
            put(members::update_member).delete(members::delete_member),
        )
        // Events
        .route("/events", get(events::list_events).post(events::create_event))
        .route("/events/range", get(events::list_events_in_range))
        .route(
            "/events/:id",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route("/events/:id/export-txt", post(events::export_event_txt))
        // Reports
        .route("/reports/stats", get(reports::stats))
        .route("/reports/export-csv", get(reports::export_csv))
        .route("/reports/task-participation", get(reports::task_participation))
        .route(
            "/reports/export-task-participation-csv",
            get(reports::export_task_participation_csv),
        )
        .route(
            "/reports/member-participation-summary",
            get(reports::member_participation_summary),
        )
        .route(
            "/reports/export-member-summary-csv",
            get(reports::export_member_summary_csv),
        )
        // Task taxonomy
        .route("/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route("/tasks/categories", get(tasks::list_categories))
        .route(
            "/tasks/:id",
            put(tasks::update_task).delete(tasks::delete_task),
        )
        .route("/meta", get(health::meta_handler));

    Router::new()
        .route("/health", get(health::health_handler))
        .nest("/api", api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
