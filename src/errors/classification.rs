use serde::Serialize;
use super::types::NavGuardError;

/// Failure families the interceptor distinguishes when degrading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    /// Oracle unreachable or non-2xx; recovered by heuristic scoring.
    OracleUnavailable,
    /// Decision surface received an unreadable payload; neutral context substituted.
    MalformedPayload,
    /// Decision message missing its tab or URL; rejected without state change.
    ProtocolViolation,
    /// Context or verdict construction failed; an explicit error verdict is emitted.
    AnalysisFailure,
    /// Everything outside the navigation path (config, IO, host plumbing).
    Operational,
}

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub kind: ErrorKind,
    pub error_type: &'static str,
    /// The subsystem recovers locally and keeps serving navigations.
    pub recoverable: bool,
    /// The degradation must be visible to the user (never silently "safe").
    pub user_visible: bool,
}

impl NavGuardError {
    /// Classify this error into the interceptor's degradation taxonomy.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            NavGuardError::Network(_) => ErrorClassification {
                kind: ErrorKind::OracleUnavailable,
                error_type: "NetworkError",
                recoverable: true,
                user_visible: true,
            },
            NavGuardError::OracleStatus { .. } => ErrorClassification {
                kind: ErrorKind::OracleUnavailable,
                error_type: "OracleStatusError",
                recoverable: true,
                user_visible: true,
            },
            NavGuardError::OracleRejected(_) => ErrorClassification {
                kind: ErrorKind::OracleUnavailable,
                error_type: "OracleRejectedError",
                recoverable: true,
                user_visible: true,
            },
            NavGuardError::Payload(_) => ErrorClassification {
                kind: ErrorKind::MalformedPayload,
                error_type: "PayloadError",
                recoverable: true,
                user_visible: false,
            },
            NavGuardError::Protocol(_) => ErrorClassification {
                kind: ErrorKind::ProtocolViolation,
                error_type: "ProtocolError",
                recoverable: true,
                user_visible: false,
            },
            NavGuardError::InvalidUrl(_) => ErrorClassification {
                kind: ErrorKind::AnalysisFailure,
                error_type: "InvalidUrlError",
                recoverable: true,
                user_visible: true,
            },
            NavGuardError::Analysis(_) => ErrorClassification {
                kind: ErrorKind::AnalysisFailure,
                error_type: "AnalysisError",
                recoverable: true,
                user_visible: true,
            },

            NavGuardError::Config(_) => ErrorClassification {
                kind: ErrorKind::Operational,
                error_type: "ConfigError",
                recoverable: false,
                user_visible: false,
            },
            NavGuardError::Host(_) => ErrorClassification {
                kind: ErrorKind::Operational,
                error_type: "HostError",
                recoverable: true,
                user_visible: false,
            },
            NavGuardError::ChannelClosed(_) => ErrorClassification {
                kind: ErrorKind::Operational,
                error_type: "ChannelClosedError",
                recoverable: false,
                user_visible: false,
            },
            NavGuardError::Internal(_) => ErrorClassification {
                kind: ErrorKind::Operational,
                error_type: "InternalError",
                recoverable: false,
                user_visible: false,
            },
            NavGuardError::Io(_) => ErrorClassification {
                kind: ErrorKind::Operational,
                error_type: "IoError",
                recoverable: false,
                user_visible: false,
            },
            NavGuardError::Json(_) => ErrorClassification {
                kind: ErrorKind::MalformedPayload,
                error_type: "JsonError",
                recoverable: true,
                user_visible: false,
            },
            NavGuardError::Yaml(_) => ErrorClassification {
                kind: ErrorKind::Operational,
                error_type: "YamlError",
                recoverable: false,
                user_visible: false,
            },
        }
    }
}
