//! The word-card interaction state machine
//!
//! Single writer over a keyed mapping of [`WordCardEntry`] records. Every
//! mutating call serializes the full mapping through the injected
//! repository (write-through, best-effort) and then notifies subscribed
//! listeners. Selectors are pure reads returning defaults for ids never
//! interacted with.

use std::collections::HashSet;

use super::models::{CardFace, LearningStats, OptionOutcome, WordCardEntry, WordCardSnapshot};
use crate::storage::SnapshotRepository;

/// Sink for "word learned" events. The store calls both methods exactly
/// once per first-ever reveal of a word; repeat reveals are never signaled.
pub trait ProgressSink: Send {
    fn increment_words_learned(&mut self);
    fn check_and_update_streak(&mut self);
}

type Listener = Box<dyn Fn() + Send>;

/// Authoritative per-word interaction state.
///
/// Faces move `question -> answer` exactly once, on the first correct
/// selection; `answer <-> reflection` freely once revealed; never back to
/// `question` except via [`reset_entry`](Self::reset_entry) or
/// [`reset_all`](Self::reset_all).
pub struct WordCardStore {
    snapshot: WordCardSnapshot,
    /// Ids currently mid-playback. Transient: never persisted, empty
    /// after every rehydration.
    speaking: HashSet<String>,
    repository: Box<dyn SnapshotRepository>,
    progress: Option<Box<dyn ProgressSink>>,
    listeners: Vec<Listener>,
}

impl WordCardStore {
    /// Create a store, rehydrating from the repository. A missing record,
    /// failed read, or unparseable record all yield the empty mapping.
    pub fn new(repository: Box<dyn SnapshotRepository>) -> Self {
        let mut snapshot = match repository.load() {
            Ok(Some(record)) => match serde_json::from_str::<WordCardSnapshot>(&record) {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    log::warn!("Discarding unparseable word-card record: {}", e);
                    WordCardSnapshot::default()
                }
            },
            Ok(None) => WordCardSnapshot::default(),
            Err(e) => {
                log::warn!("Failed to load word-card record, starting empty: {}", e);
                WordCardSnapshot::default()
            }
        };

        for entry in snapshot.words.values_mut() {
            entry.normalize();
        }

        Self {
            snapshot,
            speaking: HashSet::new(),
            repository,
            progress: None,
            listeners: Vec::new(),
        }
    }

    /// Attach the progress collaborator signaled on first-ever reveals.
    pub fn attach_progress(&mut self, sink: Box<dyn ProgressSink>) {
        self.progress = Some(sink);
    }

    /// Register a change listener, invoked after every mutation. Listeners
    /// receive no payload; they re-read state through the selectors.
    pub fn subscribe(&mut self, listener: impl Fn() + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // ===== Mutating operations =====

    /// Set the face directly. Used for manual navigation between the
    /// answer and reflection views once a word is revealed.
    pub fn set_face(&mut self, id: &str, face: CardFace) {
        self.entry_mut(id).face = face;
        self.commit();
    }

    /// Record the user's choice of `option_value` for word `id`.
    ///
    /// Attempts always increment, including repeats of the same option;
    /// re-selecting an option updates its outcome tag in place. The first
    /// correct selection reveals the entry, surfaces the answer face
    /// (unless already at reflection), and signals the progress sink.
    pub fn select_option(&mut self, id: &str, option_value: &str, is_correct: bool) {
        let entry = self.entry_mut(id);
        let first_reveal = is_correct && !entry.revealed;

        entry.attempts += 1;
        entry.selected_option = Some(option_value.to_string());
        entry.option_outcomes.insert(
            option_value.to_string(),
            if is_correct {
                OptionOutcome::Correct
            } else {
                OptionOutcome::Incorrect
            },
        );

        if is_correct {
            entry.revealed = true;
            if entry.face != CardFace::Reflection {
                entry.face = CardFace::Answer;
            }
        }

        if first_reveal {
            if let Some(progress) = self.progress.as_mut() {
                progress.increment_words_learned();
                progress.check_and_update_streak();
            }
        }

        self.commit();
    }

    /// Drop the current selection, keeping outcomes, attempts, face and
    /// reveal status. No-op when nothing is selected.
    pub fn clear_selection(&mut self, id: &str) {
        let cleared = match self.snapshot.words.get_mut(id) {
            Some(entry) if entry.selected_option.is_some() => {
                entry.selected_option = None;
                true
            }
            _ => false,
        };

        if cleared {
            self.commit();
        } else {
            log::warn!("clear_selection: no selection to clear for '{}'", id);
        }
    }

    /// Force-reveal an entry, reconciling with externally-known state
    /// (e.g. data migrated from a legacy store). Idempotent: when the
    /// entry is already revealed, only a differing `attempts` value
    /// changes anything. Never signals the progress sink.
    pub fn mark_revealed(&mut self, id: &str, attempts: Option<u32>) {
        let entry = self.entry_mut(id);

        if entry.revealed {
            match attempts {
                Some(n) if n != entry.attempts => entry.attempts = n,
                _ => return,
            }
        } else {
            entry.revealed = true;
            if let Some(n) = attempts {
                entry.attempts = n;
            }
            if entry.face != CardFace::Reflection {
                entry.face = CardFace::Answer;
            }
        }

        self.commit();
    }

    /// Delete one entry, reverting it to the default state on next access.
    pub fn reset_entry(&mut self, id: &str) {
        self.speaking.remove(id);
        if self.snapshot.words.remove(id).is_none() {
            log::warn!("reset_entry: no entry for '{}'", id);
            return;
        }
        self.commit();
    }

    /// Destructive whole-store reset: clears every entry and all transient
    /// state. Intended for tests and explicit user-initiated resets.
    pub fn reset_all(&mut self) {
        self.snapshot.words.clear();
        self.speaking.clear();
        self.commit();
    }

    // ===== Transient speech tracking =====

    /// Flag a word as currently being spoken aloud. Fire-and-forget:
    /// notifies listeners but is never persisted.
    pub fn set_speaking(&mut self, id: &str, speaking: bool) {
        if speaking {
            self.speaking.insert(id.to_string());
        } else {
            self.speaking.remove(id);
        }
        self.notify();
    }

    pub fn is_speaking(&self, id: &str) -> bool {
        self.speaking.contains(id)
    }

    // ===== Selectors =====

    pub fn face(&self, id: &str) -> CardFace {
        self.snapshot
            .words
            .get(id)
            .map(|e| e.face)
            .unwrap_or_default()
    }

    pub fn selected_option(&self, id: &str) -> Option<&str> {
        self.snapshot
            .words
            .get(id)
            .and_then(|e| e.selected_option.as_deref())
    }

    /// Outcome tag for one option, `Default` if never tried.
    pub fn option_outcome(&self, id: &str, option_value: &str) -> OptionOutcome {
        self.snapshot
            .words
            .get(id)
            .and_then(|e| e.option_outcomes.get(option_value).copied())
            .unwrap_or_default()
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.snapshot.words.get(id).map_or(false, |e| e.revealed)
    }

    pub fn attempts(&self, id: &str) -> u32 {
        self.snapshot.words.get(id).map_or(0, |e| e.attempts)
    }

    /// Ids revealed at least once, sorted for stable iteration.
    pub fn revealed_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .snapshot
            .words
            .iter()
            .filter(|(_, e)| e.revealed)
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    /// Totals across the whole mapping.
    pub fn learning_stats(&self) -> LearningStats {
        let words = &self.snapshot.words;
        LearningStats {
            total_words: words.len(),
            revealed_words: words.values().filter(|e| e.revealed).count(),
            in_progress_words: words
                .values()
                .filter(|e| !e.revealed && e.attempts > 0)
                .count(),
            total_attempts: words.values().map(|e| e.attempts as u64).sum(),
        }
    }

    /// Copy of the persisted state, as it would be written to storage.
    pub fn snapshot(&self) -> WordCardSnapshot {
        self.snapshot.clone()
    }

    // ===== Internals =====

    fn entry_mut(&mut self, id: &str) -> &mut WordCardEntry {
        self.snapshot.words.entry(id.to_string()).or_default()
    }

    /// Write-through save plus change notification. Persistence is
    /// best-effort: a failed write is logged and swallowed, the in-memory
    /// mutation stands.
    fn commit(&mut self) {
        match serde_json::to_string_pretty(&self.snapshot) {
            Ok(record) => {
                if let Err(e) = self.repository.save(&record) {
                    log::warn!("Failed to persist word-card state: {}", e);
                }
            }
            Err(e) => {
                log::warn!("Failed to serialize word-card state: {}", e);
            }
        }
        self.notify();
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener();
        }
    }
}
