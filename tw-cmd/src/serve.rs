//! The snapshot JSON endpoint.
//!
//! Every request opens its own connection on a blocking thread and drops it
//! before the response is written. The server holds only the store path.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tw_core::Snapshot;
use tw_db::Database;

use crate::{DEFAULT_LOOKBACK_HOURS, MAX_LOOKBACK_HOURS};

/// Shared state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db_path: Arc<PathBuf>,
}

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            AppError::Internal(msg) => {
                log::error!("snapshot request failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg)
            }
        };
        let body = ApiError {
            code: code.to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
pub struct SnapshotQuery {
    pub hours: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// GET /health
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /api/snapshot?hours=N
async fn get_snapshot(
    State(state): State<AppState>,
    Query(query): Query<SnapshotQuery>,
) -> Result<Json<Snapshot>, AppError> {
    let hours = query.hours.unwrap_or(DEFAULT_LOOKBACK_HOURS);
    if !(1..=MAX_LOOKBACK_HOURS).contains(&hours) {
        return Err(AppError::BadRequest(format!(
            "hours must be between 1 and {}, got {}",
            MAX_LOOKBACK_HOURS, hours
        )));
    }

    let path = state.db_path.clone();
    let snapshot = tokio::task::spawn_blocking(move || {
        let db = Database::open(path.as_path())?;
        db.query_snapshot(hours)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;
    Ok(Json(snapshot))
}

/// Create the router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // the dashboard page may be served from a different origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/snapshot", get(get_snapshot))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
                .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
        )
        .with_state(state)
}

pub async fn run_serve(db_path: PathBuf, addr: &str) -> anyhow::Result<()> {
    // fail at startup rather than on the first request
    Database::open(&db_path)?;

    let state = AppState {
        db_path: Arc::new(db_path),
    };
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Serving snapshots from {} on http://{}", state.db_path.display(), addr);
    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
