// Copyright (c) 2025-2026 the galpack contributors
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use console::Term;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// Stage name constants for consistent progress tracking.
pub mod stages {
    /// Gallery scanning stage (spinner, file count is not known up front).
    pub const SCANNING: &str = "scanning";
    /// File move/copy stage.
    pub const TRANSFERRING: &str = "transferring";
}

/// Manager for multi-stage progress bars.
///
/// # Example
///
/// ```no_run
/// use galpack::utils::progress::{ProgressManager, stages};
///
/// let mut manager = ProgressManager::new(false);
/// let bar = manager.add_stage(stages::TRANSFERRING, 100);
/// bar.inc(50);
/// manager.finish(stages::TRANSFERRING, "Moved 100 files");
/// ```
///
/// # TTY Detection
///
/// When stdout is not a TTY, or the run is quiet, bars are hidden and
/// produce no output.
pub struct ProgressManager {
    multi: MultiProgress,
    bars: HashMap<String, ProgressBar>,
    visible: bool,
}

impl ProgressManager {
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            multi: MultiProgress::new(),
            bars: HashMap::new(),
            visible: !quiet && Term::stdout().is_term(),
        }
    }

    /// Adds a new progress stage with a stage-specific style.
    ///
    /// Unknown stage names use a generic bar style.
    #[must_use]
    pub fn add_stage(&mut self, name: &str, total: u64) -> ProgressBar {
        let pb = if self.visible {
            if name == stages::SCANNING {
                let spinner = ProgressBar::new_spinner();
                spinner.enable_steady_tick(std::time::Duration::from_millis(100));
                self.multi.add(spinner)
            } else {
                self.multi.add(ProgressBar::new(total))
            }
        } else {
            ProgressBar::hidden()
        };

        pb.set_style(Self::style_for_stage(name));
        self.bars.insert(name.to_string(), pb.clone());
        pb
    }

    /// Clears a stage's bar and prints `message` in its place.
    pub fn finish(&self, stage: &str, message: &str) {
        if let Some(pb) = self.bars.get(stage) {
            pb.finish_and_clear();
            if self.visible {
                let _ = self.multi.println(message);
            }
        }
    }

    /// Abandons a stage, e.g. after an error.
    pub fn abandon(&self, stage: &str) {
        if let Some(pb) = self.bars.get(stage) {
            pb.abandon();
        }
    }

    fn style_for_stage(name: &str) -> ProgressStyle {
        let template = match name {
            stages::SCANNING => "{spinner:.green} Scanning gallery... {pos} files {msg}",
            stages::TRANSFERRING => "[{bar:40.cyan/blue}] {pos}/{len} Transferring... {msg}",
            _ => "[{bar:40.cyan/blue}] {pos}/{len} {msg}",
        };

        ProgressStyle::default_bar()
            .template(template)
            .unwrap_or_else(|e| {
                tracing::warn!(
                    "Failed to parse progress style template for stage '{}': {e}",
                    name
                );
                ProgressStyle::default_bar()
            })
            .progress_chars("#>-")
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl std::fmt::Debug for ProgressManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressManager")
            .field("stages", &self.bars.keys().collect::<Vec<_>>())
            .field("visible", &self.visible)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_stage() {
        let mut manager = ProgressManager::new(true);
        let _scanning = manager.add_stage(stages::SCANNING, 0);
        let _transferring = manager.add_stage(stages::TRANSFERRING, 10);

        assert!(manager.bars.contains_key(stages::SCANNING));
        assert!(manager.bars.contains_key(stages::TRANSFERRING));
        assert!(!manager.is_visible());
    }

    #[test]
    fn test_hidden_bar_still_counts() {
        let mut manager = ProgressManager::new(true);
        let bar = manager.add_stage(stages::TRANSFERRING, 10);
        bar.inc(4);
        assert_eq!(bar.position(), 4);
        manager.finish(stages::TRANSFERRING, "done");
    }

    #[test]
    fn test_unknown_stage_is_ignored() {
        let manager = ProgressManager::new(true);
        manager.finish("nonexistent", "done");
        manager.abandon("nonexistent");
    }

    #[test]
    fn test_stage_styles_parse() {
        let _ = ProgressManager::style_for_stage(stages::SCANNING);
        let _ = ProgressManager::style_for_stage(stages::TRANSFERRING);
        let _ = ProgressManager::style_for_stage("unknown");
    }
}
