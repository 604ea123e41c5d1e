use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use async_trait::async_trait;
use navguard::classifiers::{match_allowlist, match_denylist};
use navguard::config::ScoringConfig;
use navguard::errors::NavGuardError;
use navguard::models::{RiskLevel, VerdictSource, ORACLE_UNAVAILABLE_WARNING};
use navguard::oracle::{OracleResponse, RiskOracle};
use navguard::pipeline::RiskPipeline;

enum Behaviour {
    Score(f64),
    Fail,
    Panic,
}

struct StubOracle {
    calls: AtomicUsize,
    behaviour: Behaviour,
}

impl StubOracle {
    fn new(behaviour: Behaviour) -> Arc<Self> {
        Arc::new(Self { calls: AtomicUsize::new(0), behaviour })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RiskOracle for StubOracle {
    async fn assess(&self, _url: &str) -> Result<OracleResponse, NavGuardError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behaviour {
            Behaviour::Score(score) => Ok(OracleResponse {
                phishing_score: Some(score),
                risk_level: Some("low".to_string()),
                confidence: Some(88.0),
                patterns: vec!["No suspicious patterns".to_string()],
                ..Default::default()
            }),
            Behaviour::Fail => Err(NavGuardError::Network("connection refused".to_string())),
            Behaviour::Panic => panic!("oracle blew up"),
        }
    }

    fn endpoint(&self) -> &str {
        "stub://oracle"
    }
}

fn pipeline_with(oracle: Arc<StubOracle>) -> RiskPipeline {
    RiskPipeline::new(Some(oracle), ScoringConfig::default())
}

#[tokio::test]
async fn test_allowlist_wins_over_denylist() {
    let url = "https://paypal.com/login-verify";
    assert!(match_allowlist("paypal.com").is_some());
    assert!(match_denylist(url).is_some());

    let oracle = StubOracle::new(Behaviour::Score(99.0));
    let verdict = pipeline_with(oracle.clone()).evaluate(url).await;
    assert_eq!(verdict.source, VerdictSource::Whitelist);
    assert_eq!(verdict.risk_score, 0);
    assert_eq!(oracle.calls(), 0);
}

#[tokio::test]
async fn test_denylist_hit_skips_oracle() {
    let oracle = StubOracle::new(Behaviour::Score(5.0));
    let verdict = pipeline_with(oracle.clone())
        .evaluate("http://192.168.1.1/login-verify")
        .await;
    assert_eq!(verdict.source, VerdictSource::QuickCheck);
    assert!(verdict.is_phishing);
    assert!((85..=95).contains(&verdict.risk_score));
    assert_eq!(verdict.risk_level, Some(RiskLevel::Critical));
    assert_eq!(verdict.confidence, Some(95.0));
    assert!(verdict.findings.iter().any(|t| t == "login-verify"));
    assert_eq!(oracle.calls(), 0);
}

#[tokio::test]
async fn test_brand_mention_reaches_oracle() {
    let oracle = StubOracle::new(Behaviour::Score(12.0));
    let verdict = pipeline_with(oracle.clone())
        .evaluate("https://news.example.org/?ref=paypal")
        .await;
    assert_eq!(verdict.source, VerdictSource::Oracle);
    assert!(!verdict.is_phishing);
    assert_eq!(oracle.calls(), 1);
}

#[tokio::test]
async fn test_oracle_verdict_used_when_available() {
    let oracle = StubOracle::new(Behaviour::Score(12.4));
    let verdict = pipeline_with(oracle.clone())
        .evaluate("http://unknown-site.org/products")
        .await;
    assert_eq!(verdict.source, VerdictSource::Oracle);
    assert_eq!(verdict.risk_score, 12);
    assert_eq!(verdict.risk_level, Some(RiskLevel::Low));
    assert_eq!(verdict.confidence, Some(88.0));
    assert_eq!(oracle.calls(), 1);
}

#[tokio::test]
async fn test_oracle_failure_falls_back_to_heuristic_once() {
    let oracle = StubOracle::new(Behaviour::Fail);
    let verdict = pipeline_with(oracle.clone())
        .evaluate("http://unknown-site.org/products")
        .await;
    assert_eq!(verdict.source, VerdictSource::Heuristic);
    assert!(verdict.risk_level.is_none());
    assert!(verdict.confidence.is_none());
    assert!(verdict.warnings.iter().any(|w| w == ORACLE_UNAVAILABLE_WARNING));
    assert!(verdict.is_degraded());
    // Single attempt, no retry.
    assert_eq!(oracle.calls(), 1);
}

#[tokio::test]
async fn test_heuristic_fallback_scores_structure() {
    let oracle = StubOracle::new(Behaviour::Fail);
    let verdict = pipeline_with(oracle)
        .evaluate("http://10.20.30.40:8081/account")
        .await;
    assert_eq!(verdict.source, VerdictSource::Heuristic);
    // ip 30 + port 15 + keyword 10
    assert_eq!(verdict.risk_score, 55);
}

#[tokio::test]
async fn test_google_is_trusted() {
    let oracle = StubOracle::new(Behaviour::Fail);
    let verdict = pipeline_with(oracle.clone())
        .evaluate("https://www.google.com/search?q=x")
        .await;
    assert_eq!(verdict.source, VerdictSource::Whitelist);
    assert_eq!(verdict.risk_score, 0);
    assert_eq!(verdict.risk_level, Some(RiskLevel::Safe));
    assert_eq!(oracle.calls(), 0);
}

#[tokio::test]
async fn test_panicking_oracle_yields_error_verdict() {
    let oracle = StubOracle::new(Behaviour::Panic);
    let bundle = pipeline_with(oracle)
        .analyze("http://unknown-site.org/products", Vec::new())
        .await;
    assert_eq!(bundle.verdict.source, VerdictSource::Error);
    assert_eq!(bundle.verdict.risk_score, 0);
    assert_eq!(bundle.verdict.warnings, vec!["Unable to analyze URL".to_string()]);
    assert_eq!(bundle.verdict.display_level(&Default::default()), None);
}

#[tokio::test]
async fn test_analyze_bundles_context_with_verdict() {
    let oracle = StubOracle::new(Behaviour::Fail);
    let bundle = pipeline_with(oracle)
        .analyze("http://192.168.1.1/login-verify", Vec::new())
        .await;
    assert_eq!(bundle.context.hostname, "192.168.1.1");
    assert!(bundle.context.url_features.has_ip_address);
    assert_eq!(bundle.verdict.source, VerdictSource::QuickCheck);
}
