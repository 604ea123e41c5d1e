use axum::{extract::State, Json};
use serde_json::{json, Value};
use crate::api::AppState;
use crate::errors::NavGuardError;
use crate::interceptor::HostCommand;

pub async fn get_status(State(state): State<AppState>) -> Result<Json<Value>, NavGuardError> {
    let snapshot = state.interceptor.snapshot().await?;
    Ok(Json(json!({
        "running": state.interceptor.is_running(),
        "oracleEnabled": state.pipeline.oracle_enabled(),
        "pendingCount": snapshot.pending.len(),
        "allowedCount": snapshot.allowed.len(),
        "queuedCommands": state.host.pending_commands().await,
        "pending": snapshot.pending,
        "allowed": snapshot.allowed,
    })))
}

/// Host commands are handed out once; the adapter executes them in order.
pub async fn drain_commands(State(state): State<AppState>) -> Json<Vec<HostCommand>> {
    Json(state.host.drain_commands().await)
}
