use std::path::Path;
use crate::errors::NavGuardError;
use super::types::NavGuardConfig;
use super::security::{validate_payload_param, validate_url_fields};
use super::schema::CONFIG_SCHEMA;
use tracing::warn;

const MAX_HEURISTIC_WEIGHT: u32 = 100;

pub async fn parse_config(path: &Path) -> Result<NavGuardConfig, NavGuardError> {
    if !path.exists() {
        return Err(NavGuardError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(NavGuardError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_config_str(&content)
}

/// Parse and validate configuration text. An empty document yields defaults.
pub fn parse_config_str(content: &str) -> Result<NavGuardConfig, NavGuardError> {
    if content.trim().is_empty() {
        return Ok(NavGuardConfig::default());
    }

    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;

    // JSON Schema validation
    validate_schema(&yaml)?;

    // Parse into typed config
    let config: NavGuardConfig = serde_yaml::from_value(yaml)?;

    validate_semantics(&config)?;

    Ok(config)
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), NavGuardError> {
    let json_value = serde_json::to_value(yaml)
        .map_err(|e| NavGuardError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| NavGuardError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        // Advisory only; semantic validation below decides what is fatal.
        for e in errors {
            warn!(validation_error = %e, path = %e.instance_path, "Config schema warning");
        }
    }

    Ok(())
}

/// Reject configurations the interceptor cannot run with.
pub fn validate_semantics(config: &NavGuardConfig) -> Result<(), NavGuardError> {
    let t = &config.scoring.thresholds;
    if !(t.medium < t.high && t.high < t.critical && t.critical <= 100) {
        return Err(NavGuardError::Config(format!(
            "Risk thresholds must satisfy medium < high < critical <= 100 (got {}/{}/{})",
            t.medium, t.high, t.critical
        )));
    }

    if config.interceptor.decision_timeout_secs == 0 {
        return Err(NavGuardError::Config("decision_timeout_secs must be greater than 0".into()));
    }

    validate_payload_param(&config.interceptor.payload_param)?;
    validate_url_fields(config)?;

    let w = &config.scoring.heuristic;
    let weights = [
        ("ip_host", w.ip_host),
        ("non_standard_port", w.non_standard_port),
        ("excessive_subdomains", w.excessive_subdomains),
        ("suspicious_host_chars", w.suspicious_host_chars),
        ("keyword", w.keyword),
        ("typosquat", w.typosquat),
        ("long_url", w.long_url),
        ("at_symbol", w.at_symbol),
        ("excessive_dots", w.excessive_dots),
    ];
    if let Some((name, value)) = weights.iter().find(|(_, v)| *v > MAX_HEURISTIC_WEIGHT) {
        return Err(NavGuardError::Config(format!(
            "Heuristic weight {} must be at most {} (got {})",
            name, MAX_HEURISTIC_WEIGHT, value
        )));
    }

    if config.oracle.timeout_ms == 0 {
        return Err(NavGuardError::Config("oracle timeout_ms must be greater than 0".into()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RiskThresholds;

    #[test]
    fn test_empty_config_yields_defaults() {
        let config = parse_config_str("").unwrap();
        assert_eq!(config.interceptor.decision_timeout_secs, 300);
    }

    #[test]
    fn test_valid_config_parses() {
        let config = parse_config_str(
            "oracle:\n  endpoint: http://127.0.0.1:9000/score\n  timeout_ms: 1500\ninterceptor:\n  decision_timeout_secs: 60\n"
        ).unwrap();
        assert_eq!(config.oracle.endpoint, "http://127.0.0.1:9000/score");
        assert_eq!(config.interceptor.decision_timeout_secs, 60);
    }

    #[test]
    fn test_unordered_thresholds_rejected() {
        let mut config = NavGuardConfig::default();
        config.scoring.thresholds = RiskThresholds { medium: 60, high: 50, critical: 70 };
        assert!(validate_semantics(&config).is_err());
    }

    #[test]
    fn test_threshold_above_100_rejected() {
        let mut config = NavGuardConfig::default();
        config.scoring.thresholds = RiskThresholds { medium: 30, high: 50, critical: 101 };
        assert!(validate_semantics(&config).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = NavGuardConfig::default();
        config.interceptor.decision_timeout_secs = 0;
        assert!(validate_semantics(&config).is_err());
    }

    #[test]
    fn test_zero_oracle_timeout_rejected() {
        let result = parse_config_str("oracle:\n  timeout_ms: 0\n");
        assert!(matches!(result, Err(NavGuardError::Config(_))));
    }

    #[test]
    fn test_non_http_oracle_rejected() {
        let result = parse_config_str("oracle:\n  endpoint: ftp://example.org/score\n");
        assert!(matches!(result, Err(NavGuardError::Config(_))));
    }

    #[test]
    fn test_dangerous_surface_rejected() {
        let result = parse_config_str("interceptor:\n  decision_surface_url: 'javascript:void(0)'\n");
        assert!(matches!(result, Err(NavGuardError::Config(_))));
    }

    #[test]
    fn test_oversized_heuristic_weight_rejected() {
        let result = parse_config_str("scoring:\n  heuristic:\n    keyword: 4000000000\n");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("keyword"));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_semantics(&NavGuardConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_missing_file_rejected() {
        let result = parse_config(Path::new("/nonexistent/navguard.yaml")).await;
        assert!(matches!(result, Err(NavGuardError::Config(_))));
    }

    #[tokio::test]
    async fn test_parse_config_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("navguard.yaml");
        std::fs::write(&path, "bridge:\n  port: 9999\n").unwrap();
        let config = parse_config(&path).await.unwrap();
        assert_eq!(config.bridge.port, 9999);
    }
}
