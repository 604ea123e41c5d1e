pub mod client;
pub mod types;

pub use client::{score_with_oracle, HttpOracle, RiskOracle};
pub use types::{OracleOutcome, OracleRequest, OracleResponse};
