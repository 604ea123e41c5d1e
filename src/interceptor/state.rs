use std::collections::{BTreeMap, HashMap, HashSet};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::models::{NavigationRequest, TabId, Verdict};
use crate::utils::is_web_url;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PendingPhase {
    /// Navigation held while the verdict is computed.
    Analyzing,
    /// Tab redirected to the decision surface; waiting for the user.
    AwaitingDecision,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingNavigation {
    pub url: String,
    pub generation: u64,
    pub phase: PendingPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum IgnoreReason {
    SubFrame,
    NonWebScheme,
    DecisionSurface,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum InterceptOutcome {
    Ignored { reason: IgnoreReason },
    /// A one-shot approval was consumed; the navigation proceeds.
    Allowed,
    Intercepted {
        generation: u64,
        #[serde(rename = "evictedStale")]
        evicted_stale: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContinueOutcome {
    /// Pair added to the allowed set and the pending entry removed.
    Approved,
    /// Nothing pending for the tab.
    NotPending,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterceptorSnapshot {
    pub pending: BTreeMap<TabId, PendingNavigation>,
    pub allowed: Vec<AllowedNavigation>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub struct AllowedNavigation {
    pub tab_id: TabId,
    pub url: String,
}

/// URL without query or fragment, normalized when it parses.
fn page_address(raw: &str) -> String {
    match url::Url::parse(raw) {
        Ok(mut parsed) => {
            parsed.set_query(None);
            parsed.set_fragment(None);
            parsed.to_string()
        }
        Err(_) => raw.split(['?', '#']).next().unwrap_or(raw).to_string(),
    }
}

/// Per-tab pending and allowed navigation state. Synchronous and I/O free;
/// the service drives it one event at a time.
pub struct TabStateMachine {
    decision_surface: String,
    pending: HashMap<TabId, PendingNavigation>,
    allowed: HashSet<(TabId, String)>,
    next_generation: u64,
}

impl TabStateMachine {
    pub fn new(decision_surface: &str) -> Self {
        Self {
            decision_surface: page_address(decision_surface),
            pending: HashMap::new(),
            allowed: HashSet::new(),
            next_generation: 1,
        }
    }

    /// Same page as the surface, whatever payload query it carries.
    pub fn is_decision_surface(&self, url: &str) -> bool {
        page_address(url) == self.decision_surface
    }

    /// A navigation event arrived. Newest navigation wins: any stale entry
    /// for the tab is evicted before the new one is created.
    pub fn begin(&mut self, request: &NavigationRequest) -> InterceptOutcome {
        if !request.is_top_level() {
            return InterceptOutcome::Ignored { reason: IgnoreReason::SubFrame };
        }
        if self.is_decision_surface(&request.url) {
            return InterceptOutcome::Ignored { reason: IgnoreReason::DecisionSurface };
        }
        if !is_web_url(&request.url) {
            return InterceptOutcome::Ignored { reason: IgnoreReason::NonWebScheme };
        }

        let key = (request.tab_id, request.url.clone());
        if self.allowed.remove(&key) {
            self.pending.remove(&request.tab_id);
            return InterceptOutcome::Allowed;
        }

        let evicted_stale = self.pending.remove(&request.tab_id).is_some();
        let generation = self.next_generation;
        self.next_generation += 1;
        self.pending.insert(request.tab_id, PendingNavigation {
            url: request.url.clone(),
            generation,
            phase: PendingPhase::Analyzing,
            verdict: None,
            started_at: Utc::now(),
        });
        InterceptOutcome::Intercepted { generation, evicted_stale }
    }

    /// Store the verdict and move to awaiting-decision. Returns false when the
    /// entry was superseded or removed while the analysis ran.
    pub fn complete_analysis(&mut self, tab: TabId, generation: u64, verdict: Verdict) -> bool {
        match self.pending.get_mut(&tab) {
            Some(entry) if entry.generation == generation && entry.phase == PendingPhase::Analyzing => {
                entry.phase = PendingPhase::AwaitingDecision;
                entry.verdict = Some(verdict);
                true
            }
            _ => false,
        }
    }

    pub fn continue_decision(&mut self, tab: TabId, url: &str) -> ContinueOutcome {
        if self.pending.remove(&tab).is_none() {
            return ContinueOutcome::NotPending;
        }
        self.allowed.insert((tab, url.to_string()));
        ContinueOutcome::Approved
    }

    /// Undo an approval whose re-navigation could not be issued.
    pub fn revoke_allowed(&mut self, tab: TabId, url: &str) -> bool {
        self.allowed.remove(&(tab, url.to_string()))
    }

    pub fn cancel_decision(&mut self, tab: TabId) -> Option<PendingNavigation> {
        self.pending.remove(&tab)
    }

    /// Remove the entry only if it is the one the timer was started for.
    pub fn expire(&mut self, tab: TabId, generation: u64) -> bool {
        match self.pending.get(&tab) {
            Some(entry) if entry.generation == generation => {
                self.pending.remove(&tab);
                true
            }
            _ => false,
        }
    }

    /// Evict every trace of the tab.
    pub fn tab_closed(&mut self, tab: TabId) -> bool {
        let had_pending = self.pending.remove(&tab).is_some();
        let before = self.allowed.len();
        self.allowed.retain(|(t, _)| *t != tab);
        had_pending || self.allowed.len() != before
    }

    pub fn tab_reloading(&mut self, tab: TabId) -> Option<PendingNavigation> {
        self.pending.remove(&tab)
    }

    /// Tab started loading `url`. Loads of the decision surface and of the
    /// navigation currently held are part of the interception itself.
    pub fn tab_loading(&mut self, tab: TabId, url: &str) -> Option<PendingNavigation> {
        if self.is_decision_surface(url) {
            return None;
        }
        match self.pending.get(&tab) {
            Some(entry) if entry.url == url => None,
            Some(_) => self.pending.remove(&tab),
            None => None,
        }
    }

    pub fn pending(&self, tab: TabId) -> Option<&PendingNavigation> {
        self.pending.get(&tab)
    }

    pub fn is_allowed(&self, tab: TabId, url: &str) -> bool {
        self.allowed.contains(&(tab, url.to_string()))
    }

    pub fn snapshot(&self) -> InterceptorSnapshot {
        let mut allowed: Vec<AllowedNavigation> = self
            .allowed
            .iter()
            .map(|(tab_id, url)| AllowedNavigation { tab_id: *tab_id, url: url.clone() })
            .collect();
        allowed.sort();
        InterceptorSnapshot {
            pending: self.pending.iter().map(|(k, v)| (*k, v.clone())).collect(),
            allowed,
        }
    }
}
