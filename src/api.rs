//! HTTP trigger for the scraping pass.
//!
//! # Routes
//!
//! | Method | Path | Response |
//! |--------|------|----------|
//! | GET | `/scrape/` | `{"status": "success", "data": [...]}` |
//! | GET | `/health` | `{"status": "ok"}` |
//!
//! `/scrape/` runs the whole pipeline before answering. Sources that fail
//! are simply absent from `data`; only a fatal error (bad configuration,
//! HTTP client construction) turns into a `500` with `{"detail": "..."}`,
//! and in that case no partial data is returned.

use crate::config::ScrapeConfig;
use crate::error::ScrapeError;
use crate::models::ArticleRecord;
use crate::pipeline;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, instrument};

#[derive(Clone)]
struct AppState {
    config: Arc<ScrapeConfig>,
}

/// Body of a successful `/scrape/` call.
#[derive(Debug, Serialize)]
pub struct ScrapeResponse {
    pub status: &'static str,
    pub data: Vec<ArticleRecord>,
}

/// Fatal run error rendered as `500 {"detail": "..."}`.
struct ApiError(ScrapeError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": self.0.to_string() })),
        )
            .into_response()
    }
}

/// Build the application router for `config`.
pub fn router(config: ScrapeConfig) -> Router {
    let state = AppState {
        config: Arc::new(config),
    };

    Router::new()
        .route("/scrape/", get(scrape_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(config: ScrapeConfig, addr: SocketAddr) -> Result<(), Box<dyn std::error::Error>> {
    let app = router(config);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

#[instrument(level = "info", skip_all)]
async fn scrape_handler(State(state): State<AppState>) -> Result<Json<ScrapeResponse>, ApiError> {
    match pipeline::scrape(&state.config).await {
        Ok(data) => {
            info!(count = data.len(), "Scrape request served");
            Ok(Json(ScrapeResponse {
                status: "success",
                data,
            }))
        }
        Err(e) => {
            error!(error = %e, "Scrape request failed");
            Err(ApiError(e))
        }
    }
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
