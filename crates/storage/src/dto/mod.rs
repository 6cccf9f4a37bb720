pub mod common;
pub mod navigation;
pub mod pitch;
