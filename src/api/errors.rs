use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use crate::errors::NavGuardError;

impl IntoResponse for NavGuardError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            NavGuardError::Protocol(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            NavGuardError::InvalidUrl(_) | NavGuardError::Config(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            NavGuardError::ChannelClosed(_) => (StatusCode::SERVICE_UNAVAILABLE, self.to_string()),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        (status, Json(json!({"error": message}))).into_response()
    }
}
