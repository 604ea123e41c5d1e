use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use crate::api::models::LoadingBody;
use crate::api::AppState;
use crate::errors::NavGuardError;
use crate::models::TabId;

pub async fn tab_closed(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Value>, NavGuardError> {
    state.interceptor.on_tab_closed(TabId(id))?;
    Ok(Json(json!({"success": true})))
}

/// Without a URL the tab is treated as reloading.
pub async fn tab_loading(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    body: Option<Json<LoadingBody>>,
) -> Result<Json<Value>, NavGuardError> {
    let tab = TabId(id);
    match body.and_then(|Json(b)| b.url) {
        Some(url) => state.interceptor.on_tab_loading(tab, &url)?,
        None => state.interceptor.on_tab_reloading(tab)?,
    }
    Ok(Json(json!({"success": true})))
}
