//! Dry-run display: shows the folder plan without touching any file.

use crate::MergedConfig;
use crate::executor::FolderOutcome;
use crate::packer::PackingResult;
use crate::utils::error::GalpackError;
use crate::utils::formatting::tree_prefix;
use crate::utils::size::format_size;
use crate::utils::summary::folder_table;
use anyhow::Result;
use console::{Term, style};
use std::io::Write;
use std::path::Path;

/// Maximum number of files to list per folder before truncating.
const MAX_FILES_PER_FOLDER: usize = 3;

/// Display the planned folders and a sample of each folder's files.
///
/// # Errors
///
/// Returns an error if writing to the terminal fails.
pub fn display_dry_run_summary(
    root: &Path,
    result: &PackingResult,
    outcomes: &[FolderOutcome],
    config: &MergedConfig,
) -> Result<()> {
    let mut term = Term::stdout();

    writeln!(term)?;
    writeln!(
        term,
        "{} - No files will be moved",
        style("Dry Run").yellow().bold()
    )?;
    writeln!(term)?;
    writeln!(term, "Gallery:   {}", root.display())?;
    writeln!(term, "Capacity:  {}", format_size(result.capacity()))?;
    writeln!(term, "Mode:      {}", config.mode)?;
    writeln!(term, "Names:     {}", config.name_style)?;
    writeln!(
        term,
        "Files:     {} ({})",
        result.file_count(),
        format_size(result.total_size())
    )?;

    if result.is_empty() {
        writeln!(term)?;
        writeln!(term, "No files found.")?;
        return Ok(());
    }

    writeln!(term)?;
    writeln!(term, "{}:", style("Planned folders").bold())?;
    for line in folder_table(outcomes) {
        writeln!(term, "{line}")?;
    }

    for (plan, outcome) in result.folders().iter().zip(outcomes) {
        writeln!(term)?;
        let note = if outcome.transferred {
            String::new()
        } else {
            format!(" {}", style("(left in place)").dim())
        };
        writeln!(term, "{}{}", style(&outcome.name).bold(), note)?;

        let shown = plan.len().min(MAX_FILES_PER_FOLDER);
        let truncated = plan.len() > MAX_FILES_PER_FOLDER;
        let rows = if truncated { shown + 1 } else { shown };

        for (i, record) in plan.members.iter().take(shown).enumerate() {
            let name = record
                .id
                .strip_prefix(root)
                .unwrap_or(&record.id)
                .display()
                .to_string();
            writeln!(
                term,
                "{} {} ({})",
                style(tree_prefix(i, rows)).dim(),
                name,
                format_size(record.size)
            )?;
        }
        if truncated {
            writeln!(
                term,
                "{} ... and {} more",
                style(tree_prefix(shown, rows)).dim(),
                plan.len() - shown
            )?;
        }
    }

    if result.oversized_count() > 0 {
        writeln!(term)?;
        writeln!(
            term,
            "{} {} folder(s) will exceed the capacity because a single file is larger than it",
            style("\u{26a0}").yellow(),
            result.oversized_count()
        )?;
    }
    writeln!(term)?;

    Ok(())
}

#[derive(serde::Serialize)]
struct PlanDocument<'a> {
    gallery: &'a Path,
    capacity: u64,
    file_count: usize,
    total_size: u64,
    oversized_folders: usize,
    folders: Vec<PlannedFolder<'a>>,
}

#[derive(serde::Serialize)]
struct PlannedFolder<'a> {
    #[serde(flatten)]
    outcome: &'a FolderOutcome,
    members: &'a [crate::packer::FileRecord],
}

/// The plan as pretty-printed JSON, one entry per folder with its members.
pub fn plan_json(
    root: &Path,
    result: &PackingResult,
    outcomes: &[FolderOutcome],
) -> Result<String, GalpackError> {
    let document = PlanDocument {
        gallery: root,
        capacity: result.capacity(),
        file_count: result.file_count(),
        total_size: result.total_size(),
        oversized_folders: result.oversized_count(),
        folders: result
            .folders()
            .iter()
            .zip(outcomes)
            .map(|(plan, outcome)| PlannedFolder {
                outcome,
                members: &plan.members,
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{ExecuteOptions, NameStyle, describe_plan};
    use crate::packer::{FileRecord, PackConfig, pack};
    use chrono::DateTime;

    #[test]
    fn test_plan_json_shape() {
        let at = |secs| DateTime::from_timestamp(secs, 0).unwrap();
        let records = vec![
            FileRecord::new("/g/a.jpg", 4, at(1)),
            FileRecord::new("/g/b.jpg", 5, at(2)),
            FileRecord::new("/g/c.mp4", 30, at(3)),
        ];
        let result = pack(records, &PackConfig::new(10)).unwrap();
        let options = ExecuteOptions::new("/g").with_name_style(NameStyle::Index);
        let outcomes = describe_plan(&result, &options);

        let json = plan_json(Path::new("/g"), &result, &outcomes).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["capacity"], 10);
        assert_eq!(value["file_count"], 3);
        assert_eq!(value["oversized_folders"], 1);
        assert_eq!(value["folders"][0]["name"], "folder-000");
        assert_eq!(value["folders"][0]["total_size"], 9);
        assert_eq!(value["folders"][0]["members"][1]["id"], "/g/b.jpg");
        assert_eq!(value["folders"][1]["oversized"], true);
    }
}
