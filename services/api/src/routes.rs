use crate::infra::{AppState, OracleHandle};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use rwax_oracle::error::AppError;
use rwax_oracle::oracle::{BatchOutcome, InMemoryEventSink, PipelineEvent, PipelineMode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;

#[derive(Debug, Deserialize)]
pub(crate) struct AssetBatchRequest {
    /// Newline-separated raw listings.
    pub(crate) lines: String,
    #[serde(default)]
    pub(crate) audit: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct AssetBatchResponse {
    #[serde(flatten)]
    pub(crate) outcome: BatchOutcome,
    pub(crate) events: Vec<PipelineEvent>,
}

pub(crate) fn oracle_routes(oracle: OracleHandle) -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/oracle/assets",
            axum::routing::post(asset_batch_endpoint),
        )
        .layer(Extension(oracle))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn asset_batch_endpoint(
    Extension(oracle): Extension<OracleHandle>,
    Json(payload): Json<AssetBatchRequest>,
) -> Result<Json<AssetBatchResponse>, AppError> {
    let AssetBatchRequest { lines, audit } = payload;
    let mode = if audit {
        PipelineMode::Audit
    } else {
        PipelineMode::Publish
    };

    let sink = InMemoryEventSink::default();
    let reader = Cursor::new(lines.into_bytes());
    let outcome = oracle.for_mode(mode).from_reader(reader, &sink)?;

    Ok(Json(AssetBatchResponse {
        outcome,
        events: sink.events(),
    }))
}
