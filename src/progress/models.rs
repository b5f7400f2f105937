//! Data models for learning progress

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Persisted progress aggregate, updated as a side effect of word reveals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    /// Consecutive calendar days with at least one word learned
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
    #[serde(default)]
    pub total_words_learned: u32,
    /// Local calendar day of the most recent learned word
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_completed_date: Option<NaiveDate>,
}
