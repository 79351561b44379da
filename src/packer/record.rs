use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// One inventory entry: a file's identity, byte size and chronological key.
///
/// Records are immutable once read; the packer only ever reads them and
/// moves them into the [`FolderPlan`](super::FolderPlan) that owns them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    /// Path of the underlying file
    pub id: PathBuf,
    /// Size of the file in bytes
    pub size: u64,
    /// Modification time used for ordering
    pub timestamp: DateTime<Utc>,
}

impl FileRecord {
    pub fn new(id: impl Into<PathBuf>, size: u64, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            size,
            timestamp,
        }
    }
}
