use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value;
use tracing::warn;
use crate::api::AppState;
use crate::decision::{DecisionMessage, DecisionResponse};
use crate::errors::NavGuardError;
use crate::models::TabId;

/// Body is `{tabId?, action, url?}`; the tab id stands in for the message sender.
pub async fn submit_decision(
    State(state): State<AppState>,
    Json(mut body): Json<Value>,
) -> Result<(StatusCode, Json<DecisionResponse>), NavGuardError> {
    let sender = body
        .as_object_mut()
        .and_then(|obj| obj.remove("tabId"))
        .and_then(|v| serde_json::from_value::<TabId>(v).ok());

    let decision = DecisionMessage::from_value(body)
        .and_then(|message| message.attribute(sender))
        .map_err(|e| {
            warn!(tab_id = ?sender, error = %e, "Decision rejected");
            e
        })?;

    let response = state.interceptor.dispatch(decision).recv().await;
    let status = match response {
        DecisionResponse::Rejected { .. } => StatusCode::BAD_GATEWAY,
        DecisionResponse::Resolved { .. } => StatusCode::OK,
    };
    Ok((status, Json(response)))
}
