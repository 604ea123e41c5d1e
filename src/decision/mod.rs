//! Contract between the interceptor and the decision surface.

pub mod message;
pub mod payload;

pub use message::{Decision, DecisionMessage, DecisionResponse, DeferredResponse};
pub use payload::{from_query, from_surface_url, to_surface_url};
