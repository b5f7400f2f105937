//! Snapshot persistence boundary
//!
//! Stores serialize their full state to a single JSON record after every
//! mutation and read it back once at startup. The repository only moves
//! raw records; the stores own the (de)serialization.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Durable storage for a single named snapshot record.
///
/// Implementations are swappable: the file-backed repository is the
/// production one, the in-memory repository backs tests and the legacy
/// migration tool.
pub trait SnapshotRepository: Send {
    /// Read the current record, or `None` if nothing was ever saved.
    fn load(&self) -> Result<Option<String>>;

    /// Replace the record.
    fn save(&self, record: &str) -> Result<()>;
}

/// File-backed repository: one JSON file under a data directory.
pub struct FileRepository {
    path: PathBuf,
}

impl FileRepository {
    /// Create a repository for `file_name` under `data_dir`, creating the
    /// directory if needed.
    pub fn new(data_dir: PathBuf, file_name: &str) -> Result<Self> {
        fs::create_dir_all(&data_dir)?;
        Ok(Self {
            path: data_dir.join(file_name),
        })
    }

    /// Get the default data directory for the application.
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("wordcards"))
            .ok_or(StorageError::DataDirNotFound)
    }
}

impl SnapshotRepository for FileRepository {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&self.path)?))
    }

    fn save(&self, record: &str) -> Result<()> {
        fs::write(&self.path, record)?;
        Ok(())
    }
}

/// In-memory repository. Clones share the same record, so a test can keep
/// one handle and give another to a store.
#[derive(Clone, Default)]
pub struct MemoryRepository {
    record: Arc<Mutex<Option<String>>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotRepository for MemoryRepository {
    fn load(&self) -> Result<Option<String>> {
        let guard = self.record.lock().unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone())
    }

    fn save(&self, record: &str) -> Result<()> {
        let mut guard = self.record.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Some(record.to_string());
        Ok(())
    }
}
