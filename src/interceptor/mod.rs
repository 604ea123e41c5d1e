//! Per-tab navigation interception: suspend, analyze, decide, resume.

pub mod events;
pub mod host;
pub mod service;
pub mod state;

pub use host::{BrowserHost, HostCommand, HostCommandKind, QueuedHost};
pub use service::{InterceptorHandle, InterceptorService, InterceptorSettings};
pub use state::{
    AllowedNavigation, ContinueOutcome, IgnoreReason, InterceptOutcome, InterceptorSnapshot,
    PendingNavigation, PendingPhase, TabStateMachine,
};
