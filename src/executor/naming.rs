//! Destination folder names.

use crate::packer::{FolderPlan, PackingResult};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Day-first date, e.g. `24.12.2023`.
const DATE_FORMAT: &str = "%d.%m.%Y";

/// How destination folders are labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum NameStyle {
    /// `01.02.2023-28.02.2023`
    DateRange,
    /// `folder-000`
    Index,
    /// `000_01.02.2023-28.02.2023`
    #[default]
    IndexedDateRange,
}

impl fmt::Display for NameStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DateRange => write!(f, "date-range"),
            Self::Index => write!(f, "index"),
            Self::IndexedDateRange => write!(f, "indexed-date-range"),
        }
    }
}

/// Zero-padded width that keeps `count` labels sortable, never below `min`.
pub(crate) fn pad_width(count: usize, min: usize) -> usize {
    count.saturating_sub(1).to_string().len().max(min)
}

fn format_date<Tz: TimeZone>(ts: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    ts.with_timezone(tz).format(DATE_FORMAT).to_string()
}

/// `first-last` dates of a folder's members, if it has any.
pub fn date_range<Tz: TimeZone>(plan: &FolderPlan, tz: &Tz) -> Option<String>
where
    Tz::Offset: fmt::Display,
{
    let first = plan.first_timestamp()?;
    let last = plan.last_timestamp()?;
    Some(format!(
        "{}-{}",
        format_date(first, tz),
        format_date(last, tz)
    ))
}

/// Name for one folder; `width` is the zero-padding used for its index.
pub fn folder_name<Tz: TimeZone>(plan: &FolderPlan, style: NameStyle, width: usize, tz: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    let index = format!("{:0width$}", plan.sequence_index, width = width);
    match (style, date_range(plan, tz)) {
        (NameStyle::DateRange, Some(range)) => range,
        (NameStyle::IndexedDateRange, Some(range)) => format!("{index}_{range}"),
        (NameStyle::Index | NameStyle::DateRange | NameStyle::IndexedDateRange, _) => {
            format!("folder-{index}")
        }
    }
}

/// Names for every folder in `result`, in sequence order.
///
/// Two folders can cover the same dates under [`NameStyle::DateRange`];
/// later ones get their sequence index appended.
pub fn folder_names<Tz: TimeZone>(result: &PackingResult, style: NameStyle, tz: &Tz) -> Vec<String>
where
    Tz::Offset: fmt::Display,
{
    let width = pad_width(result.len(), 3);
    let mut seen = HashSet::new();

    result
        .folders()
        .iter()
        .map(|plan| {
            let name = folder_name(plan, style, width, tz);
            if seen.insert(name.clone()) {
                name
            } else {
                let unique = format!("{}_{}", name, plan.sequence_index);
                seen.insert(unique.clone());
                unique
            }
        })
        .collect()
}
