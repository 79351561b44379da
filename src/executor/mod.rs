// Copyright (c) 2025-2026 the galpack contributors
// SPDX-License-Identifier: MIT

//! Plan execution: creates one folder per [`FolderPlan`] and moves or copies
//! its members into it.
//!
//! Every destination is checked before the first file is touched, so a name
//! clash aborts the run with nothing moved.

pub mod naming;

pub use naming::{NameStyle, folder_names};

use crate::packer::{FileRecord, FolderPlan, PackingResult};
use crate::utils::error::GalpackError;
use chrono::Local;
use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Whether source files are moved or copied into their folders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TransferMode {
    #[default]
    Move,
    Copy,
}

impl fmt::Display for TransferMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move => write!(f, "move"),
            Self::Copy => write!(f, "copy"),
        }
    }
}

/// Options for controlling plan execution.
#[derive(Debug, Clone)]
pub struct ExecuteOptions {
    /// Directory the numbered folders are created in
    pub dest_root: PathBuf,
    /// Move or copy
    pub mode: TransferMode,
    /// Folder label scheme
    pub name_style: NameStyle,
    /// Prefix each file name with its zero-padded position in the folder
    pub number_members: bool,
    /// Leave the final folder's files where they are
    pub leave_remainder: bool,
}

impl ExecuteOptions {
    /// Create new execute options with the given destination root.
    pub fn new(dest_root: impl Into<PathBuf>) -> Self {
        Self {
            dest_root: dest_root.into(),
            mode: TransferMode::default(),
            name_style: NameStyle::default(),
            number_members: false,
            leave_remainder: false,
        }
    }

    /// Set the transfer mode.
    pub fn with_mode(mut self, mode: TransferMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the folder naming style.
    pub fn with_name_style(mut self, name_style: NameStyle) -> Self {
        self.name_style = name_style;
        self
    }

    /// Set whether member files get an order prefix.
    pub fn with_numbered_members(mut self, number_members: bool) -> Self {
        self.number_members = number_members;
        self
    }

    /// Set whether the trailing folder stays in place.
    pub fn with_leave_remainder(mut self, leave_remainder: bool) -> Self {
        self.leave_remainder = leave_remainder;
        self
    }
}

/// One folder's planned destination and, after execution, its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderOutcome {
    pub sequence_index: usize,
    pub name: String,
    pub path: PathBuf,
    pub files: usize,
    pub total_size: u64,
    pub oversized: bool,
    /// False when the folder was left in place
    pub transferred: bool,
}

/// Result of executing a packing plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionReport {
    pub folders: Vec<FolderOutcome>,
    pub files_transferred: usize,
    pub files_unchanged: usize,
}

impl ExecutionReport {
    /// Folders that were actually created.
    pub fn created(&self) -> impl Iterator<Item = &FolderOutcome> {
        self.folders.iter().filter(|f| f.transferred)
    }
}

struct Transfer<'a> {
    source: &'a Path,
    destination: PathBuf,
}

/// Work out every folder's destination without touching the filesystem.
///
/// The returned outcomes describe what [`execute_plan`] would do; the
/// trailing folder is marked untransferred under `leave_remainder`.
pub fn describe_plan(result: &PackingResult, options: &ExecuteOptions) -> Vec<FolderOutcome> {
    let names = folder_names(result, options.name_style, &Local);
    let last = result.len().saturating_sub(1);

    result
        .folders()
        .iter()
        .zip(names)
        .map(|(plan, name)| FolderOutcome {
            sequence_index: plan.sequence_index,
            path: options.dest_root.join(&name),
            name,
            files: plan.len(),
            total_size: plan.total_size,
            oversized: plan.is_oversized(result.capacity()),
            transferred: !(options.leave_remainder && plan.sequence_index == last),
        })
        .collect()
}

fn destination_name(
    record: &FileRecord,
    position: usize,
    width: usize,
    number_members: bool,
) -> Result<String, GalpackError> {
    let file_name = record
        .id
        .file_name()
        .ok_or_else(|| GalpackError::execution(&record.id, "path has no file name"))?
        .to_string_lossy();

    Ok(if number_members {
        format!("{:0width$}_{}", position, file_name, width = width)
    } else {
        file_name.into_owned()
    })
}

fn plan_transfers<'a>(
    plan: &'a FolderPlan,
    folder: &Path,
    number_members: bool,
    claimed: &mut HashSet<PathBuf>,
) -> Result<Vec<Transfer<'a>>, GalpackError> {
    let width = naming::pad_width(plan.len(), 4);
    let mut transfers = Vec::with_capacity(plan.len());

    for (position, record) in plan.members.iter().enumerate() {
        let destination = folder.join(destination_name(record, position, width, number_members)?);
        if !claimed.insert(destination.clone()) {
            return Err(GalpackError::execution(
                &record.id,
                format!(
                    "another file is also headed for {}; use --number-files",
                    destination.display()
                ),
            ));
        }
        // Placed by an earlier run
        if destination == record.id {
            tracing::trace!("Already in place: {}", destination.display());
            continue;
        }
        if destination.exists() {
            return Err(GalpackError::execution(
                &record.id,
                format!("{} already exists", destination.display()),
            ));
        }
        transfers.push(Transfer {
            source: &record.id,
            destination,
        });
    }

    Ok(transfers)
}

/// Move with a copy fallback when source and destination are on different devices.
fn move_file(source: &Path, destination: &Path) -> io::Result<()> {
    match std::fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            copy_file(source, destination)?;
            std::fs::remove_file(source)
        }
        Err(e) => Err(e),
    }
}

/// Copy, keeping the modification time so a later run sees the same order.
fn copy_file(source: &Path, destination: &Path) -> io::Result<()> {
    std::fs::copy(source, destination)?;
    let modified = std::fs::metadata(source)?.modified()?;
    std::fs::File::options()
        .write(true)
        .open(destination)?
        .set_modified(modified)
}

/// Create the planned folders and transfer their members.
///
/// # Errors
///
/// Fails before any file is touched if a destination file already exists,
/// a planned folder path is taken by something that is not a directory, or
/// two members map to the same destination. Members already sitting at their
/// destination are left alone and counted as unchanged. I/O failures mid-run
/// are returned as they happen; files already transferred stay where they
/// were put.
pub fn execute_plan(
    result: &PackingResult,
    options: &ExecuteOptions,
    progress: Option<&ProgressBar>,
) -> Result<ExecutionReport, GalpackError> {
    let outcomes = describe_plan(result, options);

    let mut claimed = HashSet::new();
    let mut work = Vec::with_capacity(outcomes.len());
    for (plan, outcome) in result.folders().iter().zip(&outcomes) {
        if outcome.transferred {
            if outcome.path.exists() && !outcome.path.is_dir() {
                return Err(GalpackError::execution(
                    &outcome.path,
                    "a file with this name is in the way of the folder",
                ));
            }
            work.push(plan_transfers(
                plan,
                &outcome.path,
                options.number_members,
                &mut claimed,
            )?);
        }
    }

    let mut files_transferred = 0;
    for (transfers, outcome) in work.iter().zip(outcomes.iter().filter(|o| o.transferred)) {
        if transfers.is_empty() {
            continue;
        }
        std::fs::create_dir_all(&outcome.path).map_err(|e| {
            GalpackError::execution(&outcome.path, format!("cannot create folder: {e}"))
        })?;
        tracing::info!(
            "Folder {}: {} files -> {}",
            outcome.sequence_index,
            transfers.len(),
            outcome.path.display()
        );

        for transfer in transfers {
            let moved = match options.mode {
                TransferMode::Move => move_file(transfer.source, &transfer.destination),
                TransferMode::Copy => copy_file(transfer.source, &transfer.destination),
            };
            moved.map_err(|e| GalpackError::execution(transfer.source, e.to_string()))?;
            tracing::debug!(
                "{} {} -> {}",
                options.mode,
                transfer.source.display(),
                transfer.destination.display()
            );

            files_transferred += 1;
            if let Some(pb) = progress {
                pb.inc(1);
                pb.set_message(outcome.name.clone());
            }
        }
    }

    Ok(ExecutionReport {
        files_unchanged: result.file_count() - files_transferred,
        files_transferred,
        folders: outcomes,
    })
}
