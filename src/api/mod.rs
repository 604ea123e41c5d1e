pub mod routes;
pub mod models;
pub mod errors;

use std::sync::Arc;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use crate::config::NavGuardConfig;
use crate::errors::NavGuardError;
use crate::interceptor::{InterceptorHandle, InterceptorService, InterceptorSettings, QueuedHost};
use crate::pipeline::RiskPipeline;

#[derive(Clone)]
pub struct AppState {
    pub interceptor: InterceptorHandle,
    pub host: Arc<QueuedHost>,
    pub pipeline: RiskPipeline,
    pub config: Arc<NavGuardConfig>,
}

/// Wire a queued host, the pipeline and a running interceptor together.
pub fn create_app_state(config: NavGuardConfig) -> Result<AppState, NavGuardError> {
    let pipeline = RiskPipeline::from_config(&config)?;
    Ok(create_app_state_with(config, pipeline))
}

pub fn create_app_state_with(config: NavGuardConfig, pipeline: RiskPipeline) -> AppState {
    let host = Arc::new(QueuedHost::new());
    let (interceptor, _task) = InterceptorService::spawn(
        InterceptorSettings::from(&config.interceptor),
        pipeline.clone(),
        host.clone(),
    );
    AppState {
        interceptor,
        host,
        pipeline,
        config: Arc::new(config),
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health::health_check))
        .route("/api/navigation", post(routes::navigation::navigate))
        .route("/api/decision", post(routes::decisions::submit_decision))
        .route("/api/tabs/:id/closed", post(routes::tabs::tab_closed))
        .route("/api/tabs/:id/loading", post(routes::tabs::tab_loading))
        .route("/api/commands", get(routes::status::drain_commands))
        .route("/api/status", get(routes::status::get_status))
        .route("/api/check", post(routes::check::check_url))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
