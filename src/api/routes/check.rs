use axum::{extract::State, Json};
use crate::api::models::{CheckBody, CheckResponse};
use crate::api::AppState;
use crate::errors::NavGuardError;
use crate::utils::parse_web_url;

/// Stateless analysis; does not touch the interceptor.
pub async fn check_url(
    State(state): State<AppState>,
    Json(body): Json<CheckBody>,
) -> Result<Json<CheckResponse>, NavGuardError> {
    parse_web_url(&body.url)?;
    let bundle = state.pipeline.analyze(&body.url, body.cookies).await;
    let thresholds = state.pipeline.thresholds();
    Ok(Json(CheckResponse {
        display_level: bundle.verdict.display_level(thresholds),
        source_label: bundle.verdict.source.display_label(),
        requires_confirmation: bundle.verdict.requires_confirmation(thresholds),
        bundle,
    }))
}
