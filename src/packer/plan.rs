use super::FileRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// An ordered group of records destined for one output folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderPlan {
    /// 0-based position in emission order
    pub sequence_index: usize,
    /// Members in ascending timestamp order
    pub members: Vec<FileRecord>,
    /// Sum of member sizes in bytes
    pub total_size: u64,
}

impl FolderPlan {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn first_timestamp(&self) -> Option<DateTime<Utc>> {
        self.members.first().map(|r| r.timestamp)
    }

    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.members.last().map(|r| r.timestamp)
    }

    /// Whether this folder is over budget. Only a folder holding a single
    /// record larger than `capacity` can be.
    pub fn is_oversized(&self, capacity: u64) -> bool {
        self.total_size > capacity
    }
}

/// The packer's output: folders in sequence order covering every input
/// record exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackingResult {
    capacity: u64,
    folders: Vec<FolderPlan>,
}

impl PackingResult {
    pub(crate) fn new(capacity: u64, folders: Vec<FolderPlan>) -> Self {
        Self { capacity, folders }
    }

    /// Capacity in bytes the folders were packed against.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn folders(&self) -> &[FolderPlan] {
        &self.folders
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    /// Total number of records across all folders.
    pub fn file_count(&self) -> usize {
        self.folders.iter().map(FolderPlan::len).sum()
    }

    pub fn total_size(&self) -> u64 {
        self.folders
            .iter()
            .fold(0u64, |acc, f| acc.saturating_add(f.total_size))
    }

    /// Number of folders that exceed capacity because of an unsplittable file.
    pub fn oversized_count(&self) -> usize {
        self.folders
            .iter()
            .filter(|f| f.is_oversized(self.capacity))
            .count()
    }

    /// All records in folder order, i.e. the sorted input stream.
    pub fn records(&self) -> impl Iterator<Item = &FileRecord> {
        self.folders.iter().flat_map(|f| f.members.iter())
    }
}
