use serde_json::Value;
use tracing::warn;
use crate::errors::NavGuardError;
use crate::models::{AnalysisBundle, SiteContext, Verdict};

/// Address of the decision surface with the serialized bundle attached as
/// a single form-encoded query parameter.
pub fn to_surface_url(surface: &str, param: &str, bundle: &AnalysisBundle) -> Result<String, NavGuardError> {
    let mut url = url::Url::parse(surface)?;
    let payload = serde_json::to_string(bundle)?;
    url.query_pairs_mut().append_pair(param, &payload);
    Ok(url.into())
}

/// Recover the bundle from a decision surface address. Never fails:
/// a missing or malformed parameter yields the neutral default.
pub fn from_surface_url(surface_url: &str, param: &str) -> AnalysisBundle {
    let value = url::Url::parse(surface_url).ok().and_then(|u| {
        u.query_pairs()
            .find(|(k, _)| k == param)
            .map(|(_, v)| v.into_owned())
    });
    from_query(value.as_deref())
}

/// Decode an already-extracted parameter value.
pub fn from_query(raw: Option<&str>) -> AnalysisBundle {
    match decode(raw) {
        Ok(bundle) => bundle,
        Err(e) => {
            warn!(error = %e, kind = ?e.classify().kind, "Decision payload unusable, using default context");
            AnalysisBundle::unknown()
        }
    }
}

fn decode(raw: Option<&str>) -> Result<AnalysisBundle, NavGuardError> {
    let raw = raw
        .filter(|r| !r.trim().is_empty())
        .ok_or_else(|| NavGuardError::Payload("parameter missing".to_string()))?;
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| NavGuardError::Payload(format!("invalid JSON: {}", e)))?;

    if let Ok(bundle) = serde_json::from_value::<AnalysisBundle>(value.clone()) {
        return Ok(bundle);
    }

    // Partial payload: keep what is usable, re-derive the rest from the URL.
    let url = value
        .pointer("/context/url")
        .and_then(Value::as_str)
        .unwrap_or("");
    let context = SiteContext::build(url, Vec::new()).unwrap_or_else(|_| SiteContext::unknown(url));
    let verdict = value
        .get("verdict")
        .cloned()
        .and_then(|v| serde_json::from_value::<Verdict>(v).ok())
        .unwrap_or_else(Verdict::unavailable);
    warn!(url = %url, "Decision payload partially decoded");
    Ok(AnalysisBundle { context, verdict })
}
