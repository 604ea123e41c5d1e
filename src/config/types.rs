use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct NavGuardConfig {
    pub oracle: OracleConfig,
    pub interceptor: InterceptorConfig,
    pub scoring: ScoringConfig,
    pub bridge: BridgeConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OracleConfig {
    pub endpoint: String,
    pub timeout_ms: u64,
    pub enabled: bool,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:5000/checkURL".to_string(),
            timeout_ms: 10_000,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InterceptorConfig {
    pub decision_timeout_secs: u64,
    pub decision_surface_url: String,
    pub payload_param: String,
}

impl Default for InterceptorConfig {
    fn default() -> Self {
        Self {
            decision_timeout_secs: 300,
            decision_surface_url: "chrome-extension://navguard/confirm.html".to_string(),
            payload_param: "data".to_string(),
        }
    }
}

impl InterceptorConfig {
    pub fn decision_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.decision_timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ScoringConfig {
    pub thresholds: RiskThresholds,
    pub heuristic: HeuristicWeights,
}

/// Score boundaries for display bucketing. A score strictly above a
/// boundary lands in the next level up.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct RiskThresholds {
    pub medium: u32,
    pub high: u32,
    pub critical: u32,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            medium: 30,
            high: 50,
            critical: 70,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct HeuristicWeights {
    pub ip_host: u32,
    pub non_standard_port: u32,
    pub excessive_subdomains: u32,
    pub suspicious_host_chars: u32,
    pub keyword: u32,
    pub typosquat: u32,
    pub long_url: u32,
    pub at_symbol: u32,
    pub excessive_dots: u32,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            ip_host: 30,
            non_standard_port: 15,
            excessive_subdomains: 20,
            suspicious_host_chars: 25,
            keyword: 10,
            typosquat: 40,
            long_url: 10,
            at_symbol: 35,
            excessive_dots: 15,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub host: String,
    pub port: u16,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
        }
    }
}
