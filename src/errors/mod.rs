pub mod types;
pub mod classification;

pub use types::NavGuardError;
pub use classification::{ErrorClassification, ErrorKind};
