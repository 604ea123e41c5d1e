use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::models::{OracleDetail, RiskLevel, Verdict, VerdictSource, ORACLE_UNAVAILABLE_WARNING};

/// Request body sent to the scoring endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct OracleRequest<'a> {
    pub url: &'a str,
}

/// Response body of the scoring endpoint. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OracleResponse {
    pub error: bool,
    pub message: Option<String>,
    pub phishing_score: Option<f64>,
    pub risk_level: Option<String>,
    pub risk_color: Option<String>,
    pub prediction: Option<String>,
    pub is_phishing: Option<bool>,
    pub confidence: Option<f64>,
    pub patterns: Vec<String>,
    pub warnings: Vec<String>,
    pub probabilities: BTreeMap<String, f64>,
}

impl OracleResponse {
    pub fn into_verdict(self) -> Verdict {
        let risk_score = self
            .phishing_score
            .filter(|s| s.is_finite())
            .map(|s| s.round().clamp(0.0, 100.0) as u32)
            .unwrap_or(0);

        // SAFE belongs to the allowlist; a classifier label of "safe" is treated as unknown.
        let risk_level = self
            .risk_level
            .as_deref()
            .and_then(RiskLevel::from_label)
            .filter(|level| *level != RiskLevel::Safe);

        Verdict {
            risk_score,
            risk_level,
            is_phishing: self.is_phishing.unwrap_or(false),
            confidence: Some(self.confidence.filter(|c| c.is_finite()).unwrap_or(0.0)),
            source: VerdictSource::Oracle,
            findings: self.patterns,
            warnings: self.warnings,
            oracle: Some(OracleDetail {
                risk_color: self.risk_color.unwrap_or_else(|| "gray".to_string()),
                prediction: self.prediction.unwrap_or_else(|| "unknown".to_string()),
                probabilities: self.probabilities,
            }),
        }
    }
}

/// What the pipeline sees from the oracle boundary. Never an error.
#[derive(Debug, Clone, PartialEq)]
pub enum OracleOutcome {
    Scored(Verdict),
    /// Fallback sentinel: zero score, connectivity warning, no findings.
    Unavailable {
        reason: String,
        score: u32,
        warnings: Vec<String>,
        findings: Vec<String>,
    },
}

impl OracleOutcome {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        OracleOutcome::Unavailable {
            reason: reason.into(),
            score: 0,
            warnings: vec![ORACLE_UNAVAILABLE_WARNING.to_string()],
            findings: Vec::new(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, OracleOutcome::Unavailable { .. })
    }
}
