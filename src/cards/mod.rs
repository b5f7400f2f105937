//! Word-card interaction state: the per-word face/selection/reveal machine

pub mod models;
pub mod store;

pub use models::{CardFace, LearningStats, OptionOutcome, WordCardEntry, WordCardSnapshot};
pub use store::{ProgressSink, WordCardStore};
