use std::collections::VecDeque;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;
use crate::errors::NavGuardError;
use crate::models::{CookieDescriptor, TabId};

/// Browser operations the interceptor needs from its host.
#[async_trait]
pub trait BrowserHost: Send + Sync {
    /// Navigate the tab's top-level frame.
    async fn update_tab(&self, tab: TabId, url: &str) -> Result<(), NavGuardError>;

    async fn remove_tab(&self, tab: TabId) -> Result<(), NavGuardError>;

    /// Cookies scoped to the URL, reduced to their descriptors.
    async fn cookies_for_url(&self, url: &str) -> Result<Vec<CookieDescriptor>, NavGuardError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HostCommandKind {
    Navigate { url: String },
    Close,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostCommand {
    pub id: Uuid,
    pub tab_id: TabId,
    #[serde(flatten)]
    pub kind: HostCommandKind,
    pub issued_at: DateTime<Utc>,
}

/// Host that queues commands for an external adapter to drain and serves
/// cookies from snapshots the adapter pushed. A snapshot is handed out once.
#[derive(Default)]
pub struct QueuedHost {
    commands: Mutex<VecDeque<HostCommand>>,
    cookies: DashMap<String, Vec<CookieDescriptor>>,
}

impl QueuedHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_cookies(&self, url: &str, cookies: Vec<CookieDescriptor>) {
        self.cookies.insert(url.to_string(), cookies);
    }

    /// Drop a snapshot that no analysis will consume.
    pub fn clear_cookies(&self, url: &str) {
        self.cookies.remove(url);
    }

    pub fn cookie_snapshots(&self) -> usize {
        self.cookies.len()
    }

    pub async fn drain_commands(&self) -> Vec<HostCommand> {
        self.commands.lock().await.drain(..).collect()
    }

    pub async fn pending_commands(&self) -> usize {
        self.commands.lock().await.len()
    }

    async fn push(&self, tab: TabId, kind: HostCommandKind) {
        self.commands.lock().await.push_back(HostCommand {
            id: Uuid::new_v4(),
            tab_id: tab,
            kind,
            issued_at: Utc::now(),
        });
    }
}

#[async_trait]
impl BrowserHost for QueuedHost {
    async fn update_tab(&self, tab: TabId, url: &str) -> Result<(), NavGuardError> {
        self.push(tab, HostCommandKind::Navigate { url: url.to_string() }).await;
        Ok(())
    }

    async fn remove_tab(&self, tab: TabId) -> Result<(), NavGuardError> {
        self.push(tab, HostCommandKind::Close).await;
        Ok(())
    }

    async fn cookies_for_url(&self, url: &str) -> Result<Vec<CookieDescriptor>, NavGuardError> {
        Ok(self.cookies.remove(url).map(|(_, c)| c).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_commands_queue_in_order_and_drain() {
        let host = QueuedHost::new();
        host.update_tab(TabId(3), "http://example.org/").await.unwrap();
        host.remove_tab(TabId(3)).await.unwrap();
        assert_eq!(host.pending_commands().await, 2);

        let cmds = host.drain_commands().await;
        assert_eq!(cmds[0].kind, HostCommandKind::Navigate { url: "http://example.org/".to_string() });
        assert_eq!(cmds[1].kind, HostCommandKind::Close);
        assert_ne!(cmds[0].id, cmds[1].id);
        assert_eq!(host.pending_commands().await, 0);
    }

    #[tokio::test]
    async fn test_cookie_snapshots_by_url() {
        let host = QueuedHost::new();
        host.set_cookies("http://example.org/", vec![CookieDescriptor {
            name: "sid".to_string(),
            domain: ".example.org".to_string(),
            secure: true,
            http_only: true,
            same_site: None,
            path: "/".to_string(),
        }]);
        assert_eq!(host.cookies_for_url("http://example.org/").await.unwrap().len(), 1);
        assert!(host.cookies_for_url("http://other.example/").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cookie_snapshot_taken_once() {
        let host = QueuedHost::new();
        for i in 0..100 {
            let url = format!("http://site{}.example/", i);
            host.set_cookies(&url, Vec::new());
            host.cookies_for_url(&url).await.unwrap();
        }
        assert_eq!(host.cookie_snapshots(), 0);

        host.set_cookies("http://example.org/", Vec::new());
        host.clear_cookies("http://example.org/");
        assert_eq!(host.cookie_snapshots(), 0);
    }

    #[test]
    fn test_command_wire_shape() {
        let cmd = HostCommand {
            id: Uuid::nil(),
            tab_id: TabId(9),
            kind: HostCommandKind::Navigate { url: "http://a.example/".to_string() },
            issued_at: Utc::now(),
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["tabId"], 9);
        assert_eq!(json["type"], "navigate");
        assert_eq!(json["url"], "http://a.example/");
    }
}
