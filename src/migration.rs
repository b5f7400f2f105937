//! One-time migration of the legacy reveal store into the unified
//! word-card record.
//!
//! The legacy app persisted a flat `{ id: { revealed, attempts } }` map.
//! This folds that record into the unified `{ words: { id: entry } }`
//! snapshot, offline, operating directly on two repositories. It is not
//! part of the live store's API and is safe to re-run: a second pass
//! changes nothing.

use std::collections::HashMap;

use serde::Deserialize;

use crate::cards::{CardFace, WordCardSnapshot};
use crate::storage::{Result, SnapshotRepository};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyEntry {
    #[serde(default)]
    revealed: bool,
    #[serde(default)]
    attempts: u32,
}

/// Fold the legacy record from `legacy` into the unified record in
/// `unified`. Returns the number of legacy entries processed.
pub fn migrate_legacy_store(
    legacy: &dyn SnapshotRepository,
    unified: &dyn SnapshotRepository,
) -> Result<usize> {
    let legacy_record = match legacy.load()? {
        Some(record) => record,
        None => {
            log::info!("Migration: no legacy record, nothing to do");
            return Ok(0);
        }
    };
    let legacy_words: HashMap<String, LegacyEntry> = serde_json::from_str(&legacy_record)?;

    let mut snapshot = match unified.load()? {
        Some(record) => serde_json::from_str::<WordCardSnapshot>(&record)?,
        None => WordCardSnapshot::default(),
    };

    for (id, legacy_entry) in &legacy_words {
        let entry = snapshot.words.entry(id.clone()).or_default();

        // Live interaction data wins over the legacy counter
        if entry.attempts == 0 {
            entry.attempts = legacy_entry.attempts;
        }

        if legacy_entry.revealed && !entry.revealed {
            entry.revealed = true;
            if entry.face != CardFace::Reflection {
                entry.face = CardFace::Answer;
            }
        }
    }

    unified.save(&serde_json::to_string_pretty(&snapshot)?)?;
    log::info!("Migration: folded {} legacy entries", legacy_words.len());

    Ok(legacy_words.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::WordCardStore;
    use crate::storage::MemoryRepository;

    #[test]
    fn test_migrates_revealed_entries() {
        let legacy = MemoryRepository::new();
        legacy
            .save(r#"{"w1":{"revealed":true,"attempts":3},"w2":{"revealed":false,"attempts":1}}"#)
            .unwrap();
        let unified = MemoryRepository::new();

        let migrated = migrate_legacy_store(&legacy, &unified).unwrap();
        assert_eq!(migrated, 2);

        let store = WordCardStore::new(Box::new(unified));
        assert!(store.is_revealed("w1"));
        assert_eq!(store.face("w1"), CardFace::Answer);
        assert_eq!(store.attempts("w1"), 3);
        assert!(!store.is_revealed("w2"));
        assert_eq!(store.attempts("w2"), 1);
    }

    #[test]
    fn test_existing_interaction_data_wins() {
        let legacy = MemoryRepository::new();
        legacy.save(r#"{"w1":{"revealed":true,"attempts":9}}"#).unwrap();

        let unified = MemoryRepository::new();
        let mut store = WordCardStore::new(Box::new(unified.clone()));
        store.select_option("w1", "fast", false);
        store.select_option("w1", "quick", true);
        drop(store);

        migrate_legacy_store(&legacy, &unified).unwrap();

        let store = WordCardStore::new(Box::new(unified));
        assert_eq!(store.attempts("w1"), 2);
        assert!(store.is_revealed("w1"));
    }

    #[test]
    fn test_migration_is_idempotent() {
        let legacy = MemoryRepository::new();
        legacy.save(r#"{"w1":{"revealed":true,"attempts":4}}"#).unwrap();
        let unified = MemoryRepository::new();

        migrate_legacy_store(&legacy, &unified).unwrap();
        let once = unified.load().unwrap();
        migrate_legacy_store(&legacy, &unified).unwrap();
        let twice = unified.load().unwrap();

        let parse = |r: Option<String>| -> WordCardSnapshot {
            serde_json::from_str(&r.unwrap()).unwrap()
        };
        assert_eq!(parse(once), parse(twice));
    }

    #[test]
    fn test_empty_legacy_store() {
        let legacy = MemoryRepository::new();
        let unified = MemoryRepository::new();

        assert_eq!(migrate_legacy_store(&legacy, &unified).unwrap(), 0);
        assert!(unified.load().unwrap().is_none());
    }
}
