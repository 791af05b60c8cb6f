// Web server — Axum-based JSON API for the analysis handler.
//
// POST /api/result analyzes a message and/or screenshot. Errors come back
// as plain text: 400 with a short reason for unusable input, 500 with a
// fixed message for anything that failed upstream. Details stay in the logs.

use std::sync::Arc;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::toxicity::traits::ModelCapability;

pub mod handlers;

/// Request bodies carry base64 screenshots, so allow well past axum's 2 MB default.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Body returned for every upstream or validation failure.
pub const PROCESSING_FAILED: &str = "Error processing request";

/// Shared application state threaded through all Axum handlers.
///
/// The model handle is built once at startup and is read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn ModelCapability>,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(model: Arc<dyn ModelCapability>, port: u16, bind: &str) -> Result<()> {
    let app = build_router(AppState { model });

    let addr = format!("{bind}:{port}");
    info!("Vibe Check listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/result", post(handlers::result::analyze_result))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe — always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Plain-text error response helper.
pub fn plain_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        message.into(),
    )
        .into_response()
}
