//! Pure URL classifiers. No I/O and no shared mutable state.

pub mod allowlist;
pub mod denylist;
pub mod heuristic;

pub use allowlist::{is_legitimate, match_allowlist, AllowlistMatch, MatchType};
pub use denylist::{match_denylist, DenylistMatch};
pub use heuristic::{local_heuristic_score, HeuristicReport};
