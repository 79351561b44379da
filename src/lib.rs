//! # galpack
//!
//! Splits a photo gallery into an ordered run of folders, each small enough
//! to upload into one free-tier storage quota, with dates ascending from the
//! first folder to the last.
//!
//! The run is a short pipeline:
//!
//! 1. **Init** - Resolve the gallery folder (argument, config, detection or prompt)
//! 2. **Scanning** - Read size and modification time of every file
//! 3. **Packing** - Cut the date-sorted files into capacity-bounded folders
//! 4. **Confirming** - Ask before touching anything (skipped with `--yes`)
//! 5. **Transferring** - Create the folders and move or copy files into them
//! 6. **Reporting** - Print the folder table and statistics
//!
//! Only [`packer`] holds real logic; it is a pure function of its input and
//! can be used without any of the filesystem glue.
//!
//! Configuration follows hierarchical precedence:
//! 1. User config (~/.config/galpack/config.toml)
//! 2. Current directory (galpack.toml)
//! 3. Explicit --config path
//! 4. Environment variables (GALPACK__*)
//! 5. CLI flags (highest precedence)

pub mod cli;
pub mod executor;
pub mod inventory;
pub mod packer;
pub mod utils;

use anyhow::{Context, Result, bail};
use executor::{ExecuteOptions, NameStyle, TransferMode};
use inventory::ScanOptions;
use packer::PackConfig;
use std::path::PathBuf;
use std::time::Instant;
use utils::error::GalpackError;
use utils::progress::{ProgressManager, stages};

/// Final resolved configuration after merging all sources (CLI, env, config files).
#[derive(Debug, Clone)]
pub struct MergedConfig {
    /// Gallery folder; detected or prompted for when absent
    pub path: Option<PathBuf>,
    /// Maximum bytes per folder
    pub capacity: i64,
    /// Move or copy
    pub mode: TransferMode,
    /// Folder naming scheme
    pub name_style: NameStyle,
    /// Destination root (defaults to the gallery folder)
    pub dest: Option<PathBuf>,
    /// Walk subfolders
    pub recursive: bool,
    /// Include dot-files
    pub include_hidden: bool,
    /// File include patterns
    pub include: Vec<String>,
    /// File exclude patterns
    pub exclude: Vec<String>,
    /// Prefix files with their position in the folder
    pub number_files: bool,
    /// Keep the final folder's files in place
    pub leave_remainder: bool,
    /// Print the plan only
    pub dry_run: bool,
    /// Print the plan as JSON only
    pub json: bool,
    /// Skip confirmation prompts
    pub yes: bool,
    /// Verbosity level (0-2)
    pub verbose: u8,
    /// Quiet mode (suppress all non-error output)
    pub quiet: bool,
}

impl MergedConfig {
    pub fn pack_config(&self) -> PackConfig {
        PackConfig::new(self.capacity)
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            recursive: self.recursive,
            include_hidden: self.include_hidden,
            include: self.include.clone(),
            exclude: self.exclude.clone(),
        }
    }

    pub fn execute_options(&self, gallery: &std::path::Path) -> ExecuteOptions {
        ExecuteOptions::new(self.dest.clone().unwrap_or_else(|| gallery.to_path_buf()))
            .with_mode(self.mode)
            .with_name_style(self.name_style)
            .with_numbered_members(self.number_files)
            .with_leave_remainder(self.leave_remainder)
    }

    /// Whether this run only reports a plan.
    pub fn is_preview(&self) -> bool {
        self.dry_run || self.json
    }
}

/// Tracks the current stage of pipeline execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Init,
    Scanning,
    Packing,
    Confirming,
    Transferring,
    Reporting,
    Complete,
}

/// State carried through the pipeline.
#[derive(Debug)]
pub struct PipelineContext {
    pub config: MergedConfig,
    pub stage: PipelineStage,
    pub progress: ProgressManager,
}

impl PipelineContext {
    pub fn new(config: MergedConfig) -> Self {
        let quiet = config.quiet || config.json;
        Self {
            config,
            stage: PipelineStage::Init,
            progress: ProgressManager::new(quiet),
        }
    }

    /// Update the current pipeline stage
    pub fn set_stage(&mut self, stage: PipelineStage) {
        self.stage = stage;
        tracing::debug!("Pipeline stage: {:?}", stage);
    }
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `-v` selects debug, `-vv` trace and
/// `-q` limits output to warnings. Logs go to stderr so `--json` stays parseable.
pub fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("galpack={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve which folder to split, asking the user when needed.
async fn resolve_gallery(config: &MergedConfig) -> Result<PathBuf> {
    if let Some(path) = &config.path {
        if !path.is_dir() {
            return Err(GalpackError::invalid_path(path).into());
        }
        return Ok(path.clone());
    }

    let mut folder = match inventory::detect_gallery_folder() {
        Some(found) => found,
        None if config.yes || config.is_preview() => {
            return Err(GalpackError::gallery_not_found(inventory::COMMON_CAMERA_PATHS).into());
        }
        None => {
            tracing::warn!(
                "Gallery folder isn't found. Checked: {}",
                inventory::COMMON_CAMERA_PATHS.join(", ")
            );
            utils::prompt::prompt_directory("Please manually enter path to the gallery folder:")
                .await?
        }
    };

    if config.yes || config.is_preview() {
        return Ok(folder);
    }

    while !utils::prompt::prompt_confirmation(
        &format!("Confirm gallery folder is at {}?", folder.display()),
        true,
    )
    .await?
    {
        folder =
            utils::prompt::prompt_directory("Please manually enter path to the gallery folder:")
                .await?;
    }

    Ok(folder)
}

pub async fn run(config: MergedConfig) -> Result<()> {
    tracing::info!("galpack v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!(
        "Configuration: capacity={}, mode={}, name_style={}, recursive={}",
        config.capacity,
        config.mode,
        config.name_style,
        config.recursive
    );

    let started = Instant::now();
    let mut ctx = PipelineContext::new(config);

    // Stage 1: Init
    ctx.set_stage(PipelineStage::Init);
    // Reject a bad capacity before walking a large gallery
    ctx.config.pack_config().validated_capacity()?;
    let gallery = resolve_gallery(&ctx.config)
        .await
        .context("Failed to resolve gallery folder")?;
    tracing::info!("Gallery folder: {}", gallery.display());

    // Stage 2: Scanning
    ctx.set_stage(PipelineStage::Scanning);
    let scan_bar = ctx.progress.add_stage(stages::SCANNING, 0);
    let scan_root = gallery.clone();
    let scan_options = ctx.config.scan_options();
    let records = tokio::task::spawn_blocking(move || {
        inventory::scan_gallery(&scan_root, &scan_options, Some(&scan_bar))
    })
    .await
    .context("Scanner task panicked")?
    .context("Failed to scan gallery")?;
    ctx.progress.finish(
        stages::SCANNING,
        &format!("Scanned {} files", records.len()),
    );

    // Stage 3: Packing
    ctx.set_stage(PipelineStage::Packing);
    let result = packer::pack(records, &ctx.config.pack_config())?;
    tracing::info!(
        "Packed {} files into {} folders",
        result.file_count(),
        result.len()
    );
    if result.oversized_count() > 0 {
        tracing::warn!(
            "{} folder(s) exceed the capacity because a single file is larger than it",
            result.oversized_count()
        );
    }

    let options = ctx.config.execute_options(&gallery);
    let outcomes = executor::describe_plan(&result, &options);

    if ctx.config.json {
        let json = utils::dry_run::plan_json(&gallery, &result, &outcomes)?;
        println!("{json}");
        return Ok(());
    }
    if ctx.config.dry_run {
        utils::dry_run::display_dry_run_summary(&gallery, &result, &outcomes, &ctx.config)?;
        return Ok(());
    }

    // Stage 4: Confirming
    ctx.set_stage(PipelineStage::Confirming);
    let to_transfer: usize = outcomes
        .iter()
        .filter(|o| o.transferred)
        .map(|o| o.files)
        .sum();
    if to_transfer > 0 && !ctx.config.yes {
        let question = format!(
            "{} {} files into {} folders under {}?",
            if ctx.config.mode == TransferMode::Move { "Move" } else { "Copy" },
            to_transfer,
            outcomes.iter().filter(|o| o.transferred).count(),
            options.dest_root.display()
        );
        if !utils::prompt::prompt_confirmation(&question, false).await? {
            bail!("Aborted; nothing was changed (pass --yes to skip this prompt)");
        }
    }

    // Stage 5: Transferring
    ctx.set_stage(PipelineStage::Transferring);
    let transfer_bar = ctx
        .progress
        .add_stage(stages::TRANSFERRING, u64::try_from(to_transfer).unwrap_or(u64::MAX));
    let report = tokio::task::spawn_blocking(move || {
        executor::execute_plan(&result, &options, Some(&transfer_bar))
    })
    .await
    .context("Transfer task panicked")?;
    let report = match report {
        Ok(report) => report,
        Err(e) => {
            ctx.progress.abandon(stages::TRANSFERRING);
            return Err(e).context("Failed to execute folder plan");
        }
    };
    ctx.progress.finish(
        stages::TRANSFERRING,
        &format!("Transferred {} files", report.files_transferred),
    );

    // Stage 6: Reporting
    ctx.set_stage(PipelineStage::Reporting);
    let capacity = ctx.config.pack_config().validated_capacity()?;
    utils::summary::display_success_summary(
        &report,
        capacity,
        started.elapsed(),
        ctx.config.quiet,
    )?;

    ctx.set_stage(PipelineStage::Complete);
    tracing::info!("Done");
    Ok(())
}
