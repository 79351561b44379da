// Copyright (c) 2025-2026 the galpack contributors
// SPDX-License-Identifier: MIT

pub mod dry_run;
pub mod error;
pub mod formatting;
pub mod progress;
pub mod prompt;
pub mod size;
pub mod summary;
