//! Streak and words-learned tracking module

pub mod models;
pub mod store;

pub use models::ProgressSnapshot;
pub use store::ProgressStore;
