//! Streak and words-learned tracking
//!
//! Consumer of the word-card store's first-reveal events. Owns its own
//! persisted record, saved through the same repository abstraction.

use std::sync::{Arc, Mutex};

use chrono::{Duration, Local, NaiveDate};

use super::models::ProgressSnapshot;
use crate::cards::ProgressSink;
use crate::storage::SnapshotRepository;

pub struct ProgressStore {
    snapshot: ProgressSnapshot,
    repository: Box<dyn SnapshotRepository>,
}

impl ProgressStore {
    /// Create a store, rehydrating from the repository. Missing or
    /// unreadable records yield fresh progress.
    pub fn new(repository: Box<dyn SnapshotRepository>) -> Self {
        let snapshot = match repository.load() {
            Ok(Some(record)) => match serde_json::from_str(&record) {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    log::warn!("Discarding unparseable progress record: {}", e);
                    ProgressSnapshot::default()
                }
            },
            Ok(None) => ProgressSnapshot::default(),
            Err(e) => {
                log::warn!("Failed to load progress record, starting fresh: {}", e);
                ProgressSnapshot::default()
            }
        };

        Self {
            snapshot,
            repository,
        }
    }

    pub fn increment_words_learned(&mut self) {
        self.snapshot.total_words_learned += 1;
        self.commit();
    }

    /// Apply the calendar-day streak rule against today in local time:
    /// same day is a no-op, exactly one day later extends the streak, any
    /// larger gap (or no history) restarts it at 1.
    pub fn check_and_update_streak(&mut self) {
        self.check_and_update_streak_on(Local::now().date_naive());
    }

    fn check_and_update_streak_on(&mut self, today: NaiveDate) {
        match self.snapshot.last_completed_date {
            Some(last) if last == today => return,
            Some(last) if today.signed_duration_since(last) == Duration::days(1) => {
                self.snapshot.streak += 1;
            }
            _ => {
                self.snapshot.streak = 1;
            }
        }

        self.snapshot.last_completed_date = Some(today);
        if self.snapshot.streak > self.snapshot.longest_streak {
            self.snapshot.longest_streak = self.snapshot.streak;
        }
        self.commit();
    }

    // ===== Selectors =====

    pub fn streak(&self) -> u32 {
        self.snapshot.streak
    }

    pub fn longest_streak(&self) -> u32 {
        self.snapshot.longest_streak
    }

    pub fn total_words_learned(&self) -> u32 {
        self.snapshot.total_words_learned
    }

    pub fn last_completed_date(&self) -> Option<NaiveDate> {
        self.snapshot.last_completed_date
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        self.snapshot.clone()
    }

    /// Best-effort write-through, same policy as the word-card store.
    fn commit(&mut self) {
        match serde_json::to_string_pretty(&self.snapshot) {
            Ok(record) => {
                if let Err(e) = self.repository.save(&record) {
                    log::warn!("Failed to persist progress state: {}", e);
                }
            }
            Err(e) => {
                log::warn!("Failed to serialize progress state: {}", e);
            }
        }
    }
}

impl ProgressSink for ProgressStore {
    fn increment_words_learned(&mut self) {
        ProgressStore::increment_words_learned(self);
    }

    fn check_and_update_streak(&mut self) {
        ProgressStore::check_and_update_streak(self);
    }
}

/// Lets the application root share one progress store between the card
/// store (as its sink) and direct readers.
impl ProgressSink for Arc<Mutex<ProgressStore>> {
    fn increment_words_learned(&mut self) {
        match self.lock() {
            Ok(mut store) => store.increment_words_learned(),
            Err(e) => log::warn!("Progress store lock poisoned: {}", e),
        }
    }

    fn check_and_update_streak(&mut self) {
        match self.lock() {
            Ok(mut store) => store.check_and_update_streak(),
            Err(e) => log::warn!("Progress store lock poisoned: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryRepository;

    fn create_test_store() -> (ProgressStore, MemoryRepository) {
        let repo = MemoryRepository::new();
        let store = ProgressStore::new(Box::new(repo.clone()));
        (store, repo)
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_first_completion_starts_streak() {
        let (mut store, _repo) = create_test_store();

        store.check_and_update_streak_on(day(2026, 8, 29));
        assert_eq!(store.streak(), 1);
        assert_eq!(store.longest_streak(), 1);
        assert_eq!(store.last_completed_date(), Some(day(2026, 8, 29)));
    }

    #[test]
    fn test_same_day_is_noop() {
        let (mut store, _repo) = create_test_store();

        store.check_and_update_streak_on(day(2026, 8, 29));
        store.check_and_update_streak_on(day(2026, 8, 29));
        assert_eq!(store.streak(), 1);
    }

    #[test]
    fn test_consecutive_days_extend_streak() {
        let (mut store, _repo) = create_test_store();

        store.check_and_update_streak_on(day(2026, 8, 28));
        store.check_and_update_streak_on(day(2026, 8, 29));
        assert_eq!(store.streak(), 2);
        assert_eq!(store.longest_streak(), 2);

        // Month boundary
        store.check_and_update_streak_on(day(2026, 8, 31));
        store.check_and_update_streak_on(day(2026, 9, 1));
        assert_eq!(store.streak(), 2);
        assert_eq!(store.longest_streak(), 2);
    }

    #[test]
    fn test_gap_resets_streak_but_keeps_longest() {
        let (mut store, _repo) = create_test_store();

        store.check_and_update_streak_on(day(2026, 8, 20));
        store.check_and_update_streak_on(day(2026, 8, 21));
        store.check_and_update_streak_on(day(2026, 8, 22));
        assert_eq!(store.streak(), 3);

        store.check_and_update_streak_on(day(2026, 8, 27));
        assert_eq!(store.streak(), 1);
        assert_eq!(store.longest_streak(), 3);
    }

    #[test]
    fn test_words_learned_counter() {
        let (mut store, _repo) = create_test_store();

        store.increment_words_learned();
        store.increment_words_learned();
        assert_eq!(store.total_words_learned(), 2);
    }

    #[test]
    fn test_round_trip_through_repository() {
        let (mut store, repo) = create_test_store();

        store.increment_words_learned();
        store.check_and_update_streak_on(day(2026, 8, 29));
        let before = store.snapshot();

        let restored = ProgressStore::new(Box::new(repo));
        assert_eq!(restored.snapshot(), before);
    }
}
