mod repository;

pub use repository::{FileRepository, MemoryRepository, Result, SnapshotRepository, StorageError};
