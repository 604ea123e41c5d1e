use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavGuardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Oracle returned HTTP {status}")]
    OracleStatus { status: u16 },

    #[error("Oracle rejected request: {0}")]
    OracleRejected(String),

    #[error("Malformed decision payload: {0}")]
    Payload(String),

    #[error("Protocol violation: {0}")]
    Protocol(String),

    #[error("Browser host error: {0}")]
    Host(String),

    #[error("Interceptor channel closed: {0}")]
    ChannelClosed(String),

    #[error("Analysis failed: {0}")]
    Analysis(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<url::ParseError> for NavGuardError {
    fn from(e: url::ParseError) -> Self {
        NavGuardError::InvalidUrl(e.to_string())
    }
}
