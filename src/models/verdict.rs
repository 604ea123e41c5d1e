use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::config::RiskThresholds;

pub const ORACLE_UNAVAILABLE_WARNING: &str = "Unable to connect to phishing detection service";
pub const ANALYSIS_UNAVAILABLE_WARNING: &str = "Unable to analyze URL";

/// Severity bucket attached to a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    /// Reserved for trusted domains; never derived from a score.
    Safe,
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Map a numeric score onto a level. Never yields `Safe`.
    pub fn from_score(score: u32, thresholds: &RiskThresholds) -> Self {
        if score > thresholds.critical {
            RiskLevel::Critical
        } else if score > thresholds.high {
            RiskLevel::High
        } else if score > thresholds.medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Parse the oracle's lowercase level labels. Unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "safe" => Some(RiskLevel::Safe),
            "low" => Some(RiskLevel::Low),
            "medium" => Some(RiskLevel::Medium),
            "high" => Some(RiskLevel::High),
            "critical" => Some(RiskLevel::Critical),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "SAFE",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pipeline stage that produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerdictSource {
    Whitelist,
    QuickCheck,
    Oracle,
    Heuristic,
    Error,
}

impl VerdictSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Whitelist => "whitelist",
            Self::QuickCheck => "quick-check",
            Self::Oracle => "oracle",
            Self::Heuristic => "heuristic",
            Self::Error => "error",
        }
    }

    pub fn display_label(&self) -> &'static str {
        match self {
            Self::Whitelist => "Trusted Domain",
            Self::QuickCheck => "Quick Pattern Matching",
            Self::Oracle => "Machine Learning Model",
            Self::Heuristic => "Local Heuristic Analysis",
            Self::Error => "Error During Analysis",
        }
    }
}

impl std::fmt::Display for VerdictSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extra fields only the oracle supplies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OracleDetail {
    pub risk_color: String,
    pub prediction: String,
    #[serde(default)]
    pub probabilities: BTreeMap<String, f64>,
}

/// Final phishing-risk judgment for one URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub risk_score: u32,
    /// Absent means "unknown", which is not the same as low risk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
    #[serde(default)]
    pub is_phishing: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    pub source: VerdictSource,
    #[serde(default)]
    pub findings: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oracle: Option<OracleDetail>,
}

impl Verdict {
    pub fn trusted(matched_domain: &str) -> Self {
        Self {
            risk_score: 0,
            risk_level: Some(RiskLevel::Safe),
            is_phishing: false,
            confidence: Some(100.0),
            source: VerdictSource::Whitelist,
            findings: vec![format!("Trusted domain: {}", matched_domain)],
            warnings: Vec::new(),
            oracle: None,
        }
    }

    pub fn quick_check(score: u32, terms: Vec<String>) -> Self {
        Self {
            risk_score: score.min(100),
            risk_level: Some(RiskLevel::Critical),
            is_phishing: true,
            confidence: Some(95.0),
            source: VerdictSource::QuickCheck,
            findings: terms,
            warnings: vec!["URL matches known phishing terms".to_string()],
            oracle: None,
        }
    }

    pub fn heuristic(score: u32, findings: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            risk_score: score.min(100),
            risk_level: None,
            is_phishing: false,
            confidence: None,
            source: VerdictSource::Heuristic,
            findings,
            warnings,
            oracle: None,
        }
    }

    /// "No data" verdict for catastrophic analysis failure.
    pub fn unavailable() -> Self {
        Self {
            risk_score: 0,
            risk_level: None,
            is_phishing: false,
            confidence: None,
            source: VerdictSource::Error,
            findings: Vec::new(),
            warnings: vec![ANALYSIS_UNAVAILABLE_WARNING.to_string()],
            oracle: None,
        }
    }

    /// Level shown to the user. `None` means no data was available.
    pub fn display_level(&self, thresholds: &RiskThresholds) -> Option<RiskLevel> {
        if self.source == VerdictSource::Error {
            return None;
        }
        if let Some(level) = self.risk_level {
            if level != RiskLevel::Safe || self.source == VerdictSource::Whitelist {
                return Some(level);
            }
        }
        Some(RiskLevel::from_score(self.risk_score, thresholds))
    }

    /// Continuing past a verdict this severe needs a second confirmation.
    pub fn requires_confirmation(&self, thresholds: &RiskThresholds) -> bool {
        self.risk_score > thresholds.critical
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.source, VerdictSource::Heuristic | VerdictSource::Error)
    }
}
