pub mod navigation;
pub mod site_context;
pub mod verdict;

pub use navigation::*;
pub use site_context::*;
pub use verdict::*;
