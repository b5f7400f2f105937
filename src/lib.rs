//! Word-card interaction state core for a vocabulary learning app.
//!
//! The [`cards::WordCardStore`] is the single writer over per-word
//! interaction state (face, selection, attempts, reveal status), persisted
//! write-through via the [`storage`] repository abstraction. The
//! [`progress::ProgressStore`] consumes first-reveal events to maintain
//! streaks and totals. The [`catalog`] supplies word entities read-only;
//! presentation layers read through selectors and subscribe for change
//! notifications.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

pub mod cards;
pub mod catalog;
pub mod migration;
pub mod progress;
pub mod storage;

use cards::WordCardStore;
use progress::ProgressStore;
use storage::FileRepository;

/// Shared state container owned by the application root. Views receive it
/// by reference; nothing in the crate is a global singleton.
pub struct AppState {
    pub cards: Arc<Mutex<WordCardStore>>,
    pub progress: Arc<Mutex<ProgressStore>>,
}

/// Build the state container: rehydrate both stores from `data_dir` and
/// wire the progress store in as the card store's reveal sink.
pub fn init(data_dir: PathBuf) -> storage::Result<AppState> {
    let cards_repo = FileRepository::new(data_dir.clone(), "word-cards.json")?;
    let progress_repo = FileRepository::new(data_dir, "progress.json")?;

    let progress = Arc::new(Mutex::new(ProgressStore::new(Box::new(progress_repo))));

    let mut cards = WordCardStore::new(Box::new(cards_repo));
    cards.attach_progress(Box::new(Arc::clone(&progress)));

    Ok(AppState {
        cards: Arc::new(Mutex::new(cards)),
        progress,
    })
}

/// Build the state container under the platform-default data directory.
pub fn init_default() -> storage::Result<AppState> {
    init(FileRepository::default_data_dir()?)
}
