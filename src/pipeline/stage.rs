use serde::{Deserialize, Serialize};
use crate::models::VerdictSource;

/// Pipeline stages in evaluation order. The first stage to produce a verdict wins.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Allowlist,
    Denylist,
    Oracle,
    Heuristic,
}

impl Stage {
    pub fn source(&self) -> VerdictSource {
        match self {
            Stage::Allowlist => VerdictSource::Whitelist,
            Stage::Denylist => VerdictSource::QuickCheck,
            Stage::Oracle => VerdictSource::Oracle,
            Stage::Heuristic => VerdictSource::Heuristic,
        }
    }

    pub fn definition(&self) -> &'static StageDefinition {
        // STAGES is indexed in declaration order.
        &STAGES[*self as usize]
    }
}

pub struct StageDefinition {
    pub stage: Stage,
    pub display_name: &'static str,
    pub description: &'static str,
    pub network_bound: bool,
}

pub static STAGES: &[StageDefinition] = &[
    StageDefinition {
        stage: Stage::Allowlist,
        display_name: "Trusted Domain",
        description: "Exact or dot-suffix match against known legitimate domains",
        network_bound: false,
    },
    StageDefinition {
        stage: Stage::Denylist,
        display_name: "Quick Pattern Matching",
        description: "Phishing term dictionary over host, path and full URL",
        network_bound: false,
    },
    StageDefinition {
        stage: Stage::Oracle,
        display_name: "Machine Learning Model",
        description: "Single bounded call to the remote scoring service",
        network_bound: true,
    },
    StageDefinition {
        stage: Stage::Heuristic,
        display_name: "Local Heuristic Analysis",
        description: "Weighted structural signals, used when the oracle is unavailable",
        network_bound: false,
    },
];
