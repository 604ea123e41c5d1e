//! Browser navigation interception with a layered phishing-risk pipeline.
//!
//! A navigation is held per tab, scored by the allowlist, denylist, remote
//! oracle and local heuristic stages in that order, and resumed or dropped
//! once the user answers on the decision surface.

pub mod classifiers;
pub mod config;
pub mod decision;
pub mod errors;
pub mod interceptor;
pub mod models;
pub mod oracle;
pub mod pipeline;
pub mod utils;

#[cfg(feature = "api")]
pub mod api;
#[cfg(feature = "cli")]
pub mod cli;
