use crate::executor::{NameStyle, TransferMode};
use crate::utils::size::parse_size;
use clap::Parser;
use std::path::PathBuf;

/// CLI argument parsing with environment variable support.
///
/// Environment variables follow the pattern `GALPACK_*` and are overridden by CLI flags.
/// Example: `GALPACK_CAPACITY=2GiB` is overridden by `--capacity 15GiB`.
#[derive(Parser, Debug, Default)]
#[command(name = "galpack")]
#[command(about = "Split a photo gallery into date-ordered folders that each fit a storage quota")]
#[command(version)]
pub struct Args {
    /// Gallery folder to split (detected when omitted)
    pub path: Option<PathBuf>,

    /// Maximum size per folder, e.g. 15GiB, 500M or plain bytes
    #[arg(short = 's', long, env = "GALPACK_CAPACITY", value_parser = parse_capacity)]
    pub capacity: Option<u64>,

    /// Move files (default) or copy them
    #[arg(short, long, value_enum, env = "GALPACK_MODE")]
    pub mode: Option<TransferMode>,

    /// Folder naming scheme
    #[arg(long, value_enum, env = "GALPACK_NAME_STYLE")]
    pub name_style: Option<NameStyle>,

    /// Where to create the folders (defaults to the gallery folder)
    #[arg(short, long, env = "GALPACK_DEST")]
    pub dest: Option<PathBuf>,

    /// Include files in subfolders
    #[arg(short, long)]
    pub recursive: bool,

    /// Include hidden files
    #[arg(long)]
    pub hidden: bool,

    /// Include only matching files (repeatable)
    #[arg(long)]
    pub include: Vec<String>,

    /// Exclude matching files (repeatable)
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Prefix files with their position inside the folder
    #[arg(long)]
    pub number_files: bool,

    /// Leave the last, partially filled folder's files in place
    #[arg(long)]
    pub leave_remainder: bool,

    /// Show the plan without moving anything
    #[arg(long, env = "GALPACK_DRY_RUN")]
    pub dry_run: bool,

    /// Print the plan as JSON without moving anything
    #[arg(long)]
    pub json: bool,

    /// Skip confirmation prompts
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Config file path
    #[arg(short, long, default_value = "galpack.toml", env = "GALPACK_CONFIG")]
    pub config: PathBuf,

    /// Increase verbosity (-v, -vv)
    #[arg(short, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short)]
    pub quiet: bool,
}

fn parse_capacity(s: &str) -> Result<u64, String> {
    parse_size(s).map_err(|e| e.to_string())
}

pub fn parse() -> Args {
    Args::parse()
}
