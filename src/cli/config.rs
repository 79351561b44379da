//! Configuration management using the `config` crate for hierarchical discovery and merging.
//!
//! ## Configuration Sources (in precedence order, highest to lowest):
//! 1. **CLI flags** - Highest precedence (merged in [`merge_config`])
//! 2. **Environment variables** - `GALPACK__GENERAL__CAPACITY` style keys
//! 3. **Config files** - Lowest precedence
//!
//! ## Config File Discovery (in merge order, later overrides earlier):
//! 1. `~/.config/galpack/config.toml` (user config directory)
//! 2. `./galpack.toml` in the current directory
//! 3. Explicit `--config` path
//!
//! ## Usage:
//! ```no_run
//! use galpack::cli::{args, config};
//!
//! let args = args::parse();
//! let file_config = config::load(&args)?;
//! let merged = config::merge_config(&args, file_config)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::MergedConfig;
use crate::cli::args::Args;
use crate::executor::{NameStyle, TransferMode};
use crate::packer::DEFAULT_CAPACITY;
use crate::utils::error::GalpackError;
use crate::utils::size::parse_size;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "galpack.toml";

/// Root configuration structure loaded from config files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub include: IncludeConfig,
    #[serde(default)]
    pub exclude: ExcludeConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    pub path: Option<PathBuf>,
    pub capacity: Option<SizeSetting>,
    pub mode: Option<TransferMode>,
    pub name_style: Option<NameStyle>,
    pub dest: Option<PathBuf>,
    #[serde(default)]
    pub recursive: bool,
    #[serde(default)]
    pub include_hidden: bool,
    #[serde(default)]
    pub number_files: bool,
    #[serde(default)]
    pub leave_remainder: bool,
}

/// A capacity written either as raw bytes or as a human size string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeSetting {
    Bytes(i64),
    Human(String),
}

impl SizeSetting {
    /// Resolve to bytes. Negative byte counts pass through so the packer can
    /// reject them as an invalid capacity.
    pub fn to_bytes(&self) -> Result<i64, GalpackError> {
        match self {
            Self::Bytes(n) => Ok(*n),
            Self::Human(s) => parse_size(s).map(saturating_i64),
        }
    }
}

fn saturating_i64(bytes: u64) -> i64 {
    i64::try_from(bytes).unwrap_or(i64::MAX)
}

/// File inclusion patterns.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IncludeConfig {
    #[serde(default)]
    pub patterns: Vec<String>,
}

/// File exclusion patterns.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExcludeConfig {
    #[serde(default)]
    pub patterns: Vec<String>,
}

fn discover_config_paths(explicit_path: &Path) -> Result<Vec<PathBuf>, GalpackError> {
    let mut paths = Vec::new();

    // User config (lowest precedence)
    if let Some(user_config) = get_user_config_path() {
        paths.push(user_config);
    }

    // Current directory config
    let current_dir_config = PathBuf::from(DEFAULT_CONFIG_FILE);
    if current_dir_config.exists() {
        paths.push(current_dir_config);
    }

    // Explicit --config path (highest precedence)
    if explicit_path != Path::new(DEFAULT_CONFIG_FILE) {
        if !explicit_path.exists() {
            return Err(GalpackError::Config(format!(
                "Config file not found: {}",
                explicit_path.display()
            )));
        }
        paths.push(explicit_path.to_path_buf());
    }

    Ok(paths)
}

fn get_user_config_path() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|config_dir| config_dir.join("galpack").join("config.toml"))
        .filter(|path| path.exists())
}

/// Load configuration from discovered config files and environment variables.
pub fn load(args: &Args) -> Result<Config, GalpackError> {
    load_from(&discover_config_paths(&args.config)?)
}

/// Load configuration from an explicit list of files, later files winning.
pub fn load_from(paths: &[PathBuf]) -> Result<Config, GalpackError> {
    let mut builder = config::Config::builder();

    for config_path in paths {
        tracing::debug!("Loading config from {}", config_path.display());
        builder = builder.add_source(config::File::from(config_path.as_path()));
    }

    builder = builder.add_source(
        config::Environment::with_prefix("GALPACK")
            .separator("__")
            .try_parsing(true),
    );

    let settings = builder.build()?;
    Ok(settings.try_deserialize()?)
}

/// Merge CLI arguments over file configuration into the final [`MergedConfig`].
pub fn merge_config(args: &Args, config: Config) -> Result<MergedConfig, GalpackError> {
    let capacity = match (args.capacity, &config.general.capacity) {
        (Some(bytes), _) => saturating_i64(bytes),
        (None, Some(setting)) => setting.to_bytes()?,
        (None, None) => DEFAULT_CAPACITY,
    };

    let include = if args.include.is_empty() {
        config.include.patterns
    } else {
        args.include.clone()
    };
    let exclude = if args.exclude.is_empty() {
        config.exclude.patterns
    } else {
        args.exclude.clone()
    };

    Ok(MergedConfig {
        path: args.path.clone().or(config.general.path),
        capacity,
        mode: args.mode.or(config.general.mode).unwrap_or_default(),
        name_style: args
            .name_style
            .or(config.general.name_style)
            .unwrap_or_default(),
        dest: args.dest.clone().or(config.general.dest),
        recursive: args.recursive || config.general.recursive,
        include_hidden: args.hidden || config.general.include_hidden,
        include,
        exclude,
        number_files: args.number_files || config.general.number_files,
        leave_remainder: args.leave_remainder || config.general.leave_remainder,
        dry_run: args.dry_run,
        json: args.json,
        yes: args.yes,
        verbose: args.verbose,
        quiet: args.quiet,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::size::GIB;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_sources() {
        let merged = merge_config(&Args::default(), Config::default()).unwrap();
        assert_eq!(merged.capacity, DEFAULT_CAPACITY);
        assert_eq!(merged.mode, TransferMode::Move);
        assert_eq!(merged.name_style, NameStyle::IndexedDateRange);
        assert!(merged.path.is_none());
        assert!(!merged.recursive);
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "galpack.toml",
            r#"
[general]
path = "/storage/emulated/0/DCIM/Camera"
capacity = "2GiB"
mode = "copy"
name_style = "date-range"
recursive = true

[include]
patterns = ["*.jpg"]
"#,
        );

        let config = load_from(&[path]).unwrap();
        let merged = merge_config(&Args::default(), config).unwrap();

        assert_eq!(
            merged.path,
            Some(PathBuf::from("/storage/emulated/0/DCIM/Camera"))
        );
        assert_eq!(merged.capacity, 2 * GIB as i64);
        assert_eq!(merged.mode, TransferMode::Copy);
        assert_eq!(merged.name_style, NameStyle::DateRange);
        assert!(merged.recursive);
        assert_eq!(merged.include, ["*.jpg"]);
    }

    #[test]
    fn test_integer_capacity_in_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "a.toml", "[general]\ncapacity = 1024\n");

        let config = load_from(&[path]).unwrap();
        assert_eq!(config.general.capacity, Some(SizeSetting::Bytes(1024)));
    }

    #[test]
    fn test_later_file_wins() {
        let dir = TempDir::new().unwrap();
        let first = write_config(&dir, "a.toml", "[general]\ncapacity = \"1G\"\n");
        let second = write_config(&dir, "b.toml", "[general]\ncapacity = \"3G\"\n");

        let config = load_from(&[first, second]).unwrap();
        let merged = merge_config(&Args::default(), config).unwrap();
        assert_eq!(merged.capacity, 3 * GIB as i64);
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config = Config::default();
        config.general.capacity = Some(SizeSetting::Human("1G".to_string()));
        config.general.mode = Some(TransferMode::Copy);
        config.include.patterns = vec!["*.png".to_string()];

        let args = Args {
            capacity: Some(2048),
            mode: Some(TransferMode::Move),
            include: vec!["*.jpg".to_string()],
            ..Args::default()
        };

        let merged = merge_config(&args, config).unwrap();
        assert_eq!(merged.capacity, 2048);
        assert_eq!(merged.mode, TransferMode::Move);
        assert_eq!(merged.include, ["*.jpg"]);
    }

    #[test]
    fn test_negative_capacity_passes_through() {
        let mut config = Config::default();
        config.general.capacity = Some(SizeSetting::Bytes(-5));

        let merged = merge_config(&Args::default(), config).unwrap();
        assert_eq!(merged.capacity, -5);
        assert!(merged.pack_config().validated_capacity().is_err());
    }

    #[test]
    fn test_bad_human_capacity() {
        let mut config = Config::default();
        config.general.capacity = Some(SizeSetting::Human("a lot".to_string()));

        let err = merge_config(&Args::default(), config).unwrap_err();
        assert!(matches!(err, GalpackError::InvalidSize { .. }));
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = discover_config_paths(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, GalpackError::Config(_)));
    }
}
