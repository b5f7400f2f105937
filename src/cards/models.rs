//! Data models for word-card interaction state

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Which view of a word card is currently presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardFace {
    /// Multiple-choice prompt, shown until the correct option is picked
    Question,
    /// Definition/answer view, surfaced on the first correct pick
    Answer,
    /// Reflection view, reachable from the answer once revealed
    Reflection,
}

impl Default for CardFace {
    fn default() -> Self {
        Self::Question
    }
}

/// Outcome tag recorded per tried option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OptionOutcome {
    /// Option was never tried
    Default,
    Correct,
    Incorrect,
}

impl Default for OptionOutcome {
    fn default() -> Self {
        Self::Default
    }
}

/// Per-word interaction record.
///
/// An absent entry is equivalent to the default one; entries are created
/// lazily on first interaction and destroyed only by an explicit reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WordCardEntry {
    #[serde(default)]
    pub face: CardFace,
    /// The option the user most recently picked, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_option: Option<String>,
    /// Outcome tag for every option tried so far. Re-selecting an option
    /// updates its tag in place rather than adding a key.
    #[serde(default)]
    pub option_outcomes: HashMap<String, OptionOutcome>,
    /// Total selections made, counting repeats of the same option
    #[serde(default)]
    pub attempts: u32,
    /// True once the correct option has been chosen at least once.
    /// Monotonic except via explicit reset.
    #[serde(default)]
    pub revealed: bool,
}

impl WordCardEntry {
    /// Re-derive a legal face after rehydration. The question face is
    /// unreachable once revealed, so a persisted `revealed` entry still
    /// showing `question` is advanced to `answer`.
    pub fn normalize(&mut self) {
        if self.revealed && self.face == CardFace::Question {
            self.face = CardFace::Answer;
        }
    }
}

/// The persisted record: the whole per-word mapping under a `words` key.
/// Transient state (speech flags, listeners) is excluded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WordCardSnapshot {
    #[serde(default)]
    pub words: HashMap<String, WordCardEntry>,
}

/// Derived totals over the whole mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LearningStats {
    /// Entries tracked (interacted with at least once)
    pub total_words: usize,
    /// Entries revealed at least once
    pub revealed_words: usize,
    /// Entries attempted but not yet revealed
    pub in_progress_words: usize,
    /// Selections across all entries
    pub total_attempts: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_entry() {
        let entry = WordCardEntry::default();
        assert_eq!(entry.face, CardFace::Question);
        assert!(entry.selected_option.is_none());
        assert!(entry.option_outcomes.is_empty());
        assert_eq!(entry.attempts, 0);
        assert!(!entry.revealed);
    }

    #[test]
    fn test_entry_deserializes_missing_fields_to_defaults() {
        let entry: WordCardEntry = serde_json::from_str("{}").unwrap();
        assert_eq!(entry, WordCardEntry::default());

        let entry: WordCardEntry =
            serde_json::from_str(r#"{"face":"answer","revealed":true}"#).unwrap();
        assert_eq!(entry.face, CardFace::Answer);
        assert!(entry.revealed);
        assert_eq!(entry.attempts, 0);
    }

    #[test]
    fn test_selected_option_omitted_when_absent() {
        let entry = WordCardEntry::default();
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("selectedOption"));
    }

    #[test]
    fn test_normalize_advances_revealed_question_face() {
        let mut entry = WordCardEntry {
            revealed: true,
            ..Default::default()
        };
        entry.normalize();
        assert_eq!(entry.face, CardFace::Answer);

        // Reflection is left alone
        let mut entry = WordCardEntry {
            revealed: true,
            face: CardFace::Reflection,
            ..Default::default()
        };
        entry.normalize();
        assert_eq!(entry.face, CardFace::Reflection);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut snapshot = WordCardSnapshot::default();
        snapshot.words.insert(
            "w1".to_string(),
            WordCardEntry {
                face: CardFace::Answer,
                selected_option: Some("quick".to_string()),
                option_outcomes: [
                    ("fast".to_string(), OptionOutcome::Incorrect),
                    ("quick".to_string(), OptionOutcome::Correct),
                ]
                .into_iter()
                .collect(),
                attempts: 2,
                revealed: true,
            },
        );

        let json = serde_json::to_string_pretty(&snapshot).unwrap();
        let restored: WordCardSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, snapshot);
    }
}
