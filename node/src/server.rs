// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::api::{HealthResponse, VersionResponse};
use crate::errors::NodeError;
use crate::pipeline::GradingPipeline;
use crate::store::RemoteStore;
use crate::telemetry;
use axum::extract::{Path, Request as AxumRequest, State};
use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use axum::middleware::{from_fn_with_state, Next};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use opr_kernel::{GradeOutcome, Grader, Height};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub type SharedPipeline<S, G> = Arc<GradingPipeline<S, G>>;

async fn auth_guard(
    State(token): State<Arc<String>>,
    req: AxumRequest,
    next: Next,
) -> Result<Response, StatusCode> {
    let provided = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|val| val.to_str().ok())
        .and_then(|val| val.strip_prefix("Bearer "));

    match provided {
        Some(p) if p == token.as_str() => Ok(next.run(req).await),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

async fn grade_height<S, G>(
    State(pipeline): State<SharedPipeline<S, G>>,
    Path(height): Path<Height>,
) -> Result<Json<GradeOutcome>, NodeError>
where
    S: RemoteStore + ?Sized + 'static,
    G: Grader + Send + Sync + 'static,
{
    let outcome = pipeline.grade_height(height).await?;
    Ok(Json(outcome))
}

async fn version_at<S, G>(
    State(pipeline): State<SharedPipeline<S, G>>,
    Path(height): Path<Height>,
) -> Json<VersionResponse>
where
    S: RemoteStore + ?Sized + 'static,
    G: Grader + Send + Sync + 'static,
{
    Json(VersionResponse { height, version: pipeline.version_at(height) })
}

async fn health<S, G>(State(pipeline): State<SharedPipeline<S, G>>) -> Json<HealthResponse>
where
    S: RemoteStore + ?Sized + 'static,
    G: Grader + Send + Sync + 'static,
{
    Json(HealthResponse { status: "ok".to_string(), chain: pipeline.chain().to_string() })
}

async fn metrics_handler() -> String {
    telemetry::get_metrics()
}

/// Routes:
/// - `GET /v1/grade/:height` grade a height
/// - `GET /v1/version/:height` protocol version at a height
/// - `GET /health`, `GET /metrics`
///
/// With an `auth_token` the `/v1` routes require `Authorization: Bearer <token>`.
pub fn build_router<S, G>(pipeline: SharedPipeline<S, G>, auth_token: Option<String>) -> Router
where
    S: RemoteStore + ?Sized + 'static,
    G: Grader + Send + Sync + 'static,
{
    let mut v1 = Router::new()
        .route("/v1/grade/:height", get(grade_height::<S, G>))
        .route("/v1/version/:height", get(version_at::<S, G>))
        .with_state(pipeline.clone());

    if let Some(token) = auth_token {
        v1 = v1.route_layer(from_fn_with_state(Arc::new(token), auth_guard));
    }

    Router::new()
        .route("/health", get(health::<S, G>))
        .with_state(pipeline)
        .route("/metrics", get(metrics_handler))
        .merge(v1)
        .layer(TraceLayer::new_for_http())
}
