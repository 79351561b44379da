// Copyright (c) 2025-2026 the galpack contributors
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalpackError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error("Invalid capacity: {capacity} bytes (capacity must be greater than zero)")]
    InvalidCapacity { capacity: i64 },

    #[error("Invalid size '{input}': {reason}")]
    InvalidSize { input: String, reason: String },

    #[error("Failed to place {}: {message}", path.display())]
    Execution { path: PathBuf, message: String },

    #[error("Parse error: {message}")]
    ParseError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}\nSuggestion: {suggestion}")]
    ValidationError { message: String, suggestion: String },
}

impl GalpackError {
    pub fn invalid_path(path: &std::path::Path) -> Self {
        GalpackError::ValidationError {
            message: format!("Gallery path is not a directory: '{}'", path.display()),
            suggestion: "Pass an existing folder as PATH or set general.path in galpack.toml"
                .to_string(),
        }
    }

    pub fn gallery_not_found(checked: &[&str]) -> Self {
        GalpackError::ValidationError {
            message: "Gallery folder isn't found".to_string(),
            suggestion: format!(
                "Checked {}. Pass the folder explicitly as PATH",
                checked.join(", ")
            ),
        }
    }

    pub fn execution(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        GalpackError::Execution {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for GalpackError {
    fn from(err: serde_json::Error) -> Self {
        GalpackError::ParseError {
            message: "Failed to serialize packing plan".to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<config::ConfigError> for GalpackError {
    fn from(err: config::ConfigError) -> Self {
        GalpackError::ParseError {
            message: "Failed to parse configuration".to_string(),
            source: Some(Box::new(err)),
        }
    }
}

/// Render an error for the terminal, adding the source chain in verbose mode.
pub fn format_error(error: &GalpackError, verbose: bool) -> String {
    let mut out = format!("\n\u{26a0} Error: {error}");
    if verbose {
        let mut source = std::error::Error::source(error);
        while let Some(cause) = source {
            out.push_str(&format!("\n\u{2514}\u{2500} {cause}"));
            source = cause.source();
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_capacity_message() {
        let err = GalpackError::InvalidCapacity { capacity: -5 };
        let msg = err.to_string();
        assert!(msg.contains("-5"));
        assert!(msg.contains("greater than zero"));
    }

    #[test]
    fn test_gallery_not_found_lists_checked_paths() {
        let err = GalpackError::gallery_not_found(&["/a", "/b"]);
        let msg = err.to_string();
        assert!(msg.contains("/a, /b"));
    }

    #[test]
    fn test_execution_error_shows_path() {
        let err = GalpackError::execution("/tmp/x.jpg", "destination exists");
        assert_eq!(
            err.to_string(),
            "Failed to place /tmp/x.jpg: destination exists"
        );
    }

    #[test]
    fn test_format_error_verbose_includes_source() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = GalpackError::from(json_err);
        let terse = format_error(&err, false);
        let verbose = format_error(&err, true);
        assert!(!terse.contains('\u{2514}'));
        assert!(verbose.contains('\u{2514}'));
    }
}
