use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::oneshot;
use crate::errors::NavGuardError;
use crate::models::TabId;

/// Message sent by the decision surface, as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum DecisionMessage {
    Continue {
        #[serde(default)]
        url: Option<String>,
    },
    Cancel,
}

/// A decision that passed protocol validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Continue { tab: TabId, url: String },
    Cancel { tab: TabId },
}

impl Decision {
    pub fn tab(&self) -> TabId {
        match self {
            Decision::Continue { tab, .. } | Decision::Cancel { tab } => *tab,
        }
    }
}

impl DecisionMessage {
    pub fn from_value(value: Value) -> Result<Self, NavGuardError> {
        serde_json::from_value(value)
            .map_err(|e| NavGuardError::Protocol(format!("Unrecognized decision message: {}", e)))
    }

    /// Attribute the message to its sending tab. A missing tab or a continue
    /// without a URL is a protocol violation.
    pub fn attribute(self, sender: Option<TabId>) -> Result<Decision, NavGuardError> {
        let tab = sender.ok_or_else(|| NavGuardError::Protocol("No tab ID".to_string()))?;
        match self {
            DecisionMessage::Continue { url: Some(url) } if !url.is_empty() => {
                Ok(Decision::Continue { tab, url })
            }
            DecisionMessage::Continue { .. } => {
                Err(NavGuardError::Protocol("No URL provided".to_string()))
            }
            DecisionMessage::Cancel => Ok(Decision::Cancel { tab }),
        }
    }
}

/// Reply to a decision message: `{success:true}`, `{success:false}` for a
/// decision that found nothing pending, or `{error}` for a rejected one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DecisionResponse {
    Resolved { success: bool },
    Rejected { error: String },
}

impl DecisionResponse {
    pub fn success() -> Self {
        DecisionResponse::Resolved { success: true }
    }

    pub fn stale() -> Self {
        DecisionResponse::Resolved { success: false }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        DecisionResponse::Rejected { error: error.into() }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DecisionResponse::Resolved { success: true })
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, DecisionResponse::Resolved { success: false })
    }
}

/// Response that the interceptor fills in once the decision has been applied.
#[derive(Debug)]
pub struct DeferredResponse {
    rx: oneshot::Receiver<DecisionResponse>,
}

impl DeferredResponse {
    pub fn channel() -> (oneshot::Sender<DecisionResponse>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Self { rx })
    }

    /// Already-settled response, used for decisions rejected before dispatch.
    pub fn ready(response: DecisionResponse) -> Self {
        let (tx, deferred) = Self::channel();
        let _ = tx.send(response);
        deferred
    }

    pub async fn recv(self) -> DecisionResponse {
        self.rx
            .await
            .unwrap_or_else(|_| DecisionResponse::rejected("Interceptor stopped"))
    }
}
