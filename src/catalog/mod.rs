//! Read-only word catalog
//!
//! The card store never fetches or caches catalog data; it only keys its
//! state by the ids the catalog supplies.

pub mod models;

use chrono::NaiveDate;

pub use models::{WordEntity, WordOption};

/// Source of word entities, ordered by date.
pub trait WordCatalog {
    fn word(&self, id: &str) -> Option<&WordEntity>;

    /// Words dated within `[start, end]`, inclusive, in date order.
    fn words_for_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<&WordEntity>;
}

/// Fixed in-memory catalog, sorted by date at construction.
pub struct StaticCatalog {
    words: Vec<WordEntity>,
}

impl StaticCatalog {
    pub fn new(mut words: Vec<WordEntity>) -> Self {
        words.sort_by(|a, b| a.date.cmp(&b.date));
        Self { words }
    }
}

impl WordCatalog for StaticCatalog {
    fn word(&self, id: &str) -> Option<&WordEntity> {
        self.words.iter().find(|w| w.id == id)
    }

    fn words_for_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<&WordEntity> {
        self.words
            .iter()
            .filter(|w| w.date >= start && w.date <= end)
            .collect()
    }
}
