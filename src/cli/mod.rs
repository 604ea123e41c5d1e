pub mod commands;
pub mod check;
pub mod serve;

pub use commands::{Cli, Commands};
