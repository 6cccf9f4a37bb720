pub mod navigation;
pub mod pitches;
