pub mod check;
pub mod decisions;
pub mod health;
pub mod navigation;
pub mod status;
pub mod tabs;
