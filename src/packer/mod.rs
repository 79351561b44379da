// Copyright (c) 2025-2026 the galpack contributors
// SPDX-License-Identifier: MIT

//! Chronological bin packing.
//!
//! Cuts a stream of files, sorted by modification time, into consecutive
//! folders whose total size stays within a fixed byte capacity. Folder N
//! always ends where folder N+1 begins: the packer never reorders records,
//! it only decides where to cut.
//!
//! # Example
//!
//! ```
//! use chrono::DateTime;
//! use galpack::packer::{FileRecord, PackConfig, pack};
//!
//! let at = |secs| DateTime::from_timestamp(secs, 0).unwrap();
//! let records = vec![
//!     FileRecord::new("a.jpg", 4, at(1)),
//!     FileRecord::new("b.jpg", 5, at(2)),
//!     FileRecord::new("c.jpg", 3, at(3)),
//! ];
//!
//! let result = pack(records, &PackConfig::new(10)).unwrap();
//! assert_eq!(result.len(), 2);
//! assert_eq!(result.folders()[0].total_size, 9);
//! ```

mod plan;
mod record;

pub use plan::{FolderPlan, PackingResult};
pub use record::FileRecord;

use crate::utils::error::GalpackError;
use crate::utils::size::GIB;

/// Free-tier quota most cloud drives hand out: 15 GiB.
pub const DEFAULT_CAPACITY: i64 = 15 * GIB as i64;

/// Packing policy handed to [`pack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackConfig {
    /// Maximum cumulative bytes per folder. Must be positive.
    pub capacity: i64,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl PackConfig {
    pub fn new(capacity: i64) -> Self {
        Self { capacity }
    }

    /// Capacity as an unsigned byte count, or `InvalidCapacity` if it is not
    /// strictly positive.
    pub fn validated_capacity(&self) -> Result<u64, GalpackError> {
        u64::try_from(self.capacity)
            .ok()
            .filter(|&c| c > 0)
            .ok_or(GalpackError::InvalidCapacity {
                capacity: self.capacity,
            })
    }
}

/// Partition `records` into capacity-bounded folders in timestamp order.
///
/// Records are stable-sorted by timestamp, so equal timestamps keep their
/// input order and repeated runs over the same inventory yield the same plan.
/// A record larger than the capacity is never dropped or split: it ends up
/// alone in a folder that exceeds the capacity, reported through
/// [`PackingResult::oversized_count`].
///
/// # Errors
///
/// Returns [`GalpackError::InvalidCapacity`] when `config.capacity <= 0`,
/// before looking at any record.
pub fn pack(
    mut records: Vec<FileRecord>,
    config: &PackConfig,
) -> Result<PackingResult, GalpackError> {
    let capacity = config.validated_capacity()?;

    records.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

    let folders = records
        .into_iter()
        .fold(Partition::default(), |partition, record| {
            partition.push(record, capacity)
        })
        .finish();

    Ok(PackingResult::new(capacity, folders))
}

/// Fold state: sealed folders plus the one still accepting records.
#[derive(Default)]
struct Partition {
    sealed: Vec<FolderPlan>,
    open: Vec<FileRecord>,
    open_size: u64,
}

impl Partition {
    fn push(mut self, record: FileRecord, capacity: u64) -> Self {
        if self.open_size.saturating_add(record.size) > capacity && !self.open.is_empty() {
            self.seal();
        }
        self.open_size = self.open_size.saturating_add(record.size);
        self.open.push(record);
        self
    }

    fn seal(&mut self) {
        let folder = FolderPlan {
            sequence_index: self.sealed.len(),
            members: std::mem::take(&mut self.open),
            total_size: std::mem::take(&mut self.open_size),
        };
        self.sealed.push(folder);
    }

    fn finish(mut self) -> Vec<FolderPlan> {
        if !self.open.is_empty() {
            self.seal();
        }
        self.sealed
    }
}
