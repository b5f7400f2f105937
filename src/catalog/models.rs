//! Data models for the word catalog

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One multiple-choice option for a word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordOption {
    pub value: String,
    pub is_correct: bool,
}

/// A "word of the day" entity. Ids are opaque and stable; the option set
/// is fixed at authoring time. The catalog guarantees exactly one option
/// is correct; consumers assume rather than enforce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntity {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub options: Vec<WordOption>,
}

impl WordEntity {
    /// Value of the correct option, if the entity carries one.
    pub fn correct_option(&self) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.is_correct)
            .map(|o| o.value.as_str())
    }
}
