pub mod evaluator;
pub mod stage;

pub use evaluator::RiskPipeline;
pub use stage::{Stage, StageDefinition, STAGES};
