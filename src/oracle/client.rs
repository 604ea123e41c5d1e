use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use crate::config::OracleConfig;
use crate::errors::NavGuardError;
use super::types::{OracleOutcome, OracleRequest, OracleResponse};

/// Remote scoring service. Implementations make a single attempt per call.
#[async_trait]
pub trait RiskOracle: Send + Sync {
    async fn assess(&self, url: &str) -> Result<OracleResponse, NavGuardError>;

    /// Endpoint identifier for logging
    fn endpoint(&self) -> &str;
}

pub struct HttpOracle {
    client: Client,
    endpoint: String,
}

impl HttpOracle {
    pub fn new(config: &OracleConfig) -> Result<Self, NavGuardError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| NavGuardError::Network(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl RiskOracle for HttpOracle {
    async fn assess(&self, url: &str) -> Result<OracleResponse, NavGuardError> {
        let resp = self.client
            .post(&self.endpoint)
            .json(&OracleRequest { url })
            .send()
            .await
            .map_err(|e| NavGuardError::Network(format!("Oracle request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(NavGuardError::OracleStatus { status: status.as_u16() });
        }

        let body: OracleResponse = resp.json().await
            .map_err(|e| NavGuardError::Network(format!("Failed to parse oracle response: {}", e)))?;

        if body.error {
            let message = body.message.unwrap_or_else(|| "error flag set".to_string());
            return Err(NavGuardError::OracleRejected(message));
        }
        Ok(body)
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Oracle boundary used by the pipeline: every failure becomes the fallback sentinel.
pub async fn score_with_oracle(oracle: &dyn RiskOracle, url: &str) -> OracleOutcome {
    match oracle.assess(url).await {
        Ok(resp) => {
            debug!(endpoint = oracle.endpoint(), url = %url, "Oracle scored URL");
            OracleOutcome::Scored(resp.into_verdict())
        }
        Err(e) => {
            warn!(
                endpoint = oracle.endpoint(),
                url = %url,
                error = %e,
                kind = ?e.classify().kind,
                "Oracle unavailable, falling back"
            );
            OracleOutcome::unavailable(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/checkURL", addr)
    }

    fn oracle_for(endpoint: String) -> HttpOracle {
        HttpOracle::new(&OracleConfig {
            endpoint,
            timeout_ms: 2_000,
            enabled: true,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_success_response_is_scored() {
        let router = Router::new().route(
            "/checkURL",
            post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "error": false,
                    "url": body["url"],
                    "phishingScore": 42,
                    "riskLevel": "medium",
                    "confidence": 77.5,
                }))
            }),
        );
        let oracle = oracle_for(spawn_stub(router).await);
        match score_with_oracle(&oracle, "http://example.org/").await {
            OracleOutcome::Scored(v) => {
                assert_eq!(v.risk_score, 42);
                assert_eq!(v.confidence, Some(77.5));
            }
            other => panic!("expected score, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_2xx_falls_back() {
        let router = Router::new().route(
            "/checkURL",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": true}))) }),
        );
        let oracle = oracle_for(spawn_stub(router).await);
        let err = oracle.assess("http://example.org/").await.unwrap_err();
        assert!(matches!(err, NavGuardError::OracleStatus { status: 500 }));
        assert!(score_with_oracle(&oracle, "http://example.org/").await.is_fallback());
    }

    #[tokio::test]
    async fn test_error_flag_on_2xx_falls_back() {
        let router = Router::new().route(
            "/checkURL",
            post(|| async { Json(json!({"error": true, "message": "model not loaded"})) }),
        );
        let oracle = oracle_for(spawn_stub(router).await);
        let err = oracle.assess("http://example.org/").await.unwrap_err();
        assert!(matches!(err, NavGuardError::OracleRejected(ref m) if m == "model not loaded"));
    }

    #[tokio::test]
    async fn test_connection_refused_falls_back() {
        // Bind then drop to get a port with nothing listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let oracle = oracle_for(format!("http://{}/checkURL", addr));
        assert!(score_with_oracle(&oracle, "http://example.org/").await.is_fallback());
    }
}
