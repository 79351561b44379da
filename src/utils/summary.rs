// Copyright (c) 2025-2026 the galpack contributors
// SPDX-License-Identifier: MIT

//! Success summary display for completed runs.
//!
//! # Example
//!
//! ```ignore
//! use galpack::utils::summary::display_success_summary;
//!
//! display_success_summary(&report, capacity, started.elapsed(), false)?;
//! ```

use crate::executor::{ExecutionReport, FolderOutcome};
use crate::utils::formatting::{format_duration, format_number, tree_prefix};
use crate::utils::size::{format_gb, format_size};
use anyhow::Result;
use console::{Term, style};
use std::io::Write;
use std::time::Duration;

/// Plain-text folder table: `No  Folder  Files  Size`.
pub fn folder_table<'a>(folders: impl IntoIterator<Item = &'a FolderOutcome>) -> Vec<String> {
    let folders: Vec<_> = folders.into_iter().collect();
    let name_width = folders
        .iter()
        .map(|f| f.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Folder".len());

    let mut lines = vec![
        format!("{:>3}   {:<name_width$}   {:>7}   {:>10}", "No", "Folder", "Files", "Size"),
        format!(
            "{:>3}   {:<name_width$}   {:>7}   {:>10}",
            "--",
            "-".repeat(name_width),
            "-".repeat(7),
            "-".repeat(10)
        ),
    ];

    for folder in folders {
        let marker = if folder.oversized { " !" } else { "" };
        lines.push(format!(
            "{:>3}   {:<name_width$}   {:>7}   {:>10}{}",
            folder.sequence_index + 1,
            folder.name,
            format_number(folder.files),
            format_gb(folder.total_size),
            marker
        ));
    }

    lines
}

/// Display a summary after the plan has been executed.
///
/// # Errors
///
/// Returns an error if writing to the terminal fails.
pub fn display_success_summary(
    report: &ExecutionReport,
    capacity: u64,
    elapsed: Duration,
    quiet: bool,
) -> Result<()> {
    if quiet {
        return Ok(());
    }

    let mut term = Term::stdout();
    writeln!(term)?;

    if report.files_transferred == 0 {
        if report.created().next().is_some() {
            writeln!(term, "Nothing to do: every file is already in its folder")?;
        } else {
            writeln!(
                term,
                "No operations performed because the total size of files does not exceed {}",
                format_size(capacity)
            )?;
        }
        return Ok(());
    }

    writeln!(
        term,
        "{} {}",
        style("\u{2713}").green().bold(),
        style("Gallery split successfully").bold()
    )?;

    writeln!(term)?;
    writeln!(term, "{}:", style("Folders created").bold())?;
    for line in folder_table(report.created()) {
        writeln!(term, "{line}")?;
    }

    let oversized = report.created().filter(|f| f.oversized).count();

    writeln!(term)?;
    writeln!(term, "{}:", style("Statistics").bold())?;
    let stats = [
        format!("Files transferred: {}", format_number(report.files_transferred)),
        format!("Files unchanged: {}", format_number(report.files_unchanged)),
        format!("Time: {}", format_duration(elapsed)),
    ];
    for (i, line) in stats.iter().enumerate() {
        writeln!(term, "{} {}", style(tree_prefix(i, stats.len())).dim(), line)?;
    }

    if oversized > 0 {
        writeln!(term)?;
        writeln!(
            term,
            "{} {} folder(s) marked ! hold a single file larger than {}",
            style("\u{26a0}").yellow(),
            oversized,
            format_size(capacity)
        )?;
    }
    writeln!(term)?;

    Ok(())
}
