//! HTTP server wiring for QuickPaste (router, middleware, shared state).

/// Environment-driven configuration.
pub mod config;
/// sled-backed key-value storage.
pub mod db;
/// Error taxonomy and HTTP mapping.
pub mod error;
/// HTTP handlers for paste endpoints.
pub mod handlers;
/// Identifier generation and collision handling.
pub mod ids;
/// Paste lifecycle manager.
pub mod lifecycle;
/// Data models.
pub mod models;
/// Server-rendered pages and static assets.
pub mod pages;

pub use config::Config;
pub use db::Database;
pub use error::AppError;
pub use lifecycle::Lifecycle;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

/// Shared state passed to HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub config: Arc<Config>,
    pub lifecycle: Lifecycle,
}

impl AppState {
    pub fn new(config: Config, db: Database) -> Self {
        let db = Arc::new(db);
        let config = Arc::new(config);
        Self {
            lifecycle: Lifecycle::new(db.clone(), config.clone()),
            db,
            config,
        }
    }
}

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // Anyone may read or create pastes, so CORS is wide open.
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(86400));

    // JSON envelope overhead on top of the content size limit
    let body_limit = state.config.max_paste_size + 16 * 1024;

    Router::new()
        .route("/", get(pages::index))
        .route("/robots.txt", get(pages::robots))
        .route("/favicon.ico", get(pages::favicon))
        .route("/favicon.svg", get(pages::favicon))
        .route("/manifest.json", get(pages::manifest))
        .route(
            "/api/paste",
            post(handlers::paste::create_paste).options(handlers::paste::preflight),
        )
        .route("/:id", get(handlers::paste::view_paste))
        .route("/:id/raw", get(handlers::paste::raw_paste))
        .with_state(state)
        .layer(
            tower::ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(body_limit))
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
}

/// Resolve the listener address from the `BIND` override or the configured port.
pub fn resolve_bind_address(config: &Config) -> SocketAddr {
    let default_bind = SocketAddr::from(([127, 0, 0, 1], config.port));
    match std::env::var("BIND") {
        Ok(value) => match value.trim().parse::<SocketAddr>() {
            Ok(addr) => addr,
            Err(err) => {
                tracing::warn!(
                    "Invalid BIND='{}': {}. Falling back to {}",
                    value,
                    err,
                    default_bind
                );
                default_bind
            }
        },
        Err(_) => default_bind,
    }
}

/// Run the Axum server with graceful shutdown support.
///
/// # Errors
/// Returns any I/O error produced by `axum::serve`.
pub async fn serve_router(
    listener: tokio::net::TcpListener,
    state: AppState,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    let app = create_app(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
}
