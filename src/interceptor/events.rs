use tokio::sync::oneshot;
use crate::decision::{Decision, DecisionResponse};
use crate::models::{AnalysisBundle, NavigationRequest, TabId};
use super::state::{InterceptOutcome, InterceptorSnapshot};

/// Everything the interceptor reacts to. Events are handled strictly in
/// arrival order by a single task.
#[derive(Debug)]
pub enum InterceptorEvent {
    /// Browser is about to navigate a tab
    Navigation {
        request: NavigationRequest,
        reply: oneshot::Sender<InterceptOutcome>,
    },
    /// A spawned analysis finished
    AnalysisComplete {
        tab: TabId,
        generation: u64,
        bundle: Box<AnalysisBundle>,
    },
    /// A validated decision from the decision surface
    Decision {
        decision: Decision,
        reply: oneshot::Sender<DecisionResponse>,
    },
    /// Decision window elapsed for the given entry
    Timeout {
        tab: TabId,
        generation: u64,
    },
    TabClosed {
        tab: TabId,
    },
    /// Tab reload; evicts unconditionally
    TabReloading {
        tab: TabId,
    },
    /// Tab entered the loading state for `url`
    TabLoading {
        tab: TabId,
        url: String,
    },
    Snapshot {
        reply: oneshot::Sender<InterceptorSnapshot>,
    },
}
