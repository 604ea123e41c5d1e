use axum::{extract::State, Json};
use crate::api::models::NavigationBody;
use crate::api::AppState;
use crate::errors::NavGuardError;
use crate::interceptor::InterceptOutcome;
use crate::models::NavigationRequest;

pub async fn navigate(
    State(state): State<AppState>,
    Json(body): Json<NavigationBody>,
) -> Result<Json<InterceptOutcome>, NavGuardError> {
    let has_cookies = body.cookies.is_some();
    if let Some(cookies) = body.cookies {
        state.host.set_cookies(&body.url, cookies);
    }
    let request = NavigationRequest {
        tab_id: body.tab_id,
        url: body.url.clone(),
        frame_id: body.frame_id,
    };
    let outcome = state.interceptor.intercept(request).await;
    // Only an intercepted navigation runs an analysis that consumes the snapshot.
    if has_cookies && !matches!(outcome, Ok(InterceptOutcome::Intercepted { .. })) {
        state.host.clear_cookies(&body.url);
    }
    Ok(Json(outcome?))
}
