//! File inventory: turns a gallery folder into [`FileRecord`]s.

pub mod gallery;

pub use gallery::{COMMON_CAMERA_PATHS, detect_gallery_folder, first_existing_dir};

use crate::packer::FileRecord;
use crate::utils::error::GalpackError;
use chrono::{DateTime, Utc};
use globset::{GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};

/// Controls which files the scan yields.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Descend into subfolders instead of listing the top level only
    pub recursive: bool,
    /// Include dot-files such as `.nomedia`
    pub include_hidden: bool,
    /// Only files matching one of these globs (empty means all)
    pub include: Vec<String>,
    /// Skip files matching any of these globs
    pub exclude: Vec<String>,
}

/// Read size and modification time for a single file.
pub fn read_record(path: PathBuf) -> Result<FileRecord, GalpackError> {
    let metadata = std::fs::metadata(&path).map_err(|e| {
        GalpackError::FileSystem(std::io::Error::new(
            e.kind(),
            format!("Failed to read metadata for {}: {}", path.display(), e),
        ))
    })?;

    let modified = metadata.modified().map_err(|e| {
        GalpackError::FileSystem(std::io::Error::new(
            e.kind(),
            format!("No modification time for {}: {}", path.display(), e),
        ))
    })?;

    Ok(FileRecord {
        id: path,
        size: metadata.len(),
        timestamp: DateTime::<Utc>::from(modified),
    })
}

/// Build a GlobSet from a list of patterns.
fn build_globset(patterns: &[String]) -> Result<GlobSet, GalpackError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = globset::GlobBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| {
                GalpackError::Config(format!("Invalid glob pattern '{}': {}", pattern, e))
            })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| GalpackError::Config(format!("Failed to build glob set: {}", e)))
}

/// Normalize path to a forward-slash separated string for glob matching.
fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// List the files under `root` as records, in file-name order.
///
/// Unreadable entries are logged and skipped; only a missing or
/// non-directory `root` is an error.
pub fn scan_gallery(
    root: &Path,
    options: &ScanOptions,
    progress: Option<&ProgressBar>,
) -> Result<Vec<FileRecord>, GalpackError> {
    if !root.is_dir() {
        return Err(GalpackError::invalid_path(root));
    }

    let include_set = build_globset(&options.include)?;
    let exclude_set = build_globset(&options.exclude)?;

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .hidden(!options.include_hidden)
        .follow_links(false)
        .max_depth(if options.recursive { None } else { Some(1) })
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut records = Vec::new();

    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Error walking directory: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let relative = normalize_path(path.strip_prefix(root).unwrap_or(path));

        if !options.include.is_empty() && !include_set.is_match(&relative) {
            tracing::trace!("Not included: {}", relative);
            continue;
        }
        if exclude_set.is_match(&relative) {
            tracing::trace!("Excluded: {}", relative);
            continue;
        }

        match read_record(path.to_path_buf()) {
            Ok(record) => {
                if let Some(pb) = progress {
                    pb.inc(1);
                    pb.set_message(relative);
                }
                records.push(record);
            }
            Err(GalpackError::FileSystem(ref io_err))
                if io_err.kind() == std::io::ErrorKind::PermissionDenied =>
            {
                tracing::warn!("Permission denied: {}", path.display());
            }
            Err(e) => {
                tracing::warn!("Failed to process file {}: {}", path.display(), e);
            }
        }
    }

    tracing::info!("Scanned {} files in {}", records.len(), root.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    fn write_file(root: &Path, rel: &str, size: usize, mtime_secs: u64) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, vec![0u8; size]).unwrap();
        let file = File::options().write(true).open(&path).unwrap();
        file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(mtime_secs))
            .unwrap();
    }

    fn file_names(records: &[FileRecord]) -> Vec<String> {
        records
            .iter()
            .map(|r| r.id.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_read_record_size_and_mtime() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "a.jpg", 123, 1_700_000_000);

        let record = read_record(dir.path().join("a.jpg")).unwrap();
        assert_eq!(record.size, 123);
        assert_eq!(record.timestamp.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_read_record_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_record(dir.path().join("missing.jpg")).unwrap_err();
        assert!(matches!(err, GalpackError::FileSystem(_)));
    }

    #[test]
    fn test_scan_flat_by_default() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "b.jpg", 1, 10);
        write_file(dir.path(), "a.jpg", 1, 20);
        write_file(dir.path(), "nested/c.jpg", 1, 30);

        let records = scan_gallery(dir.path(), &ScanOptions::default(), None).unwrap();
        assert_eq!(file_names(&records), ["a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_scan_recursive() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "a.jpg", 1, 10);
        write_file(dir.path(), "nested/c.jpg", 1, 30);

        let options = ScanOptions {
            recursive: true,
            ..ScanOptions::default()
        };
        let records = scan_gallery(dir.path(), &options, None).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_scan_skips_hidden_unless_requested() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), ".nomedia", 0, 10);
        write_file(dir.path(), "a.jpg", 1, 10);

        let records = scan_gallery(dir.path(), &ScanOptions::default(), None).unwrap();
        assert_eq!(file_names(&records), ["a.jpg"]);

        let options = ScanOptions {
            include_hidden: true,
            ..ScanOptions::default()
        };
        let records = scan_gallery(dir.path(), &options, None).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_scan_include_exclude() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "a.jpg", 1, 10);
        write_file(dir.path(), "b.MP4", 1, 10);
        write_file(dir.path(), "notes.txt", 1, 10);
        write_file(dir.path(), "skip.jpg", 1, 10);

        let options = ScanOptions {
            include: vec!["*.jpg".to_string(), "*.mp4".to_string()],
            exclude: vec!["skip.*".to_string()],
            ..ScanOptions::default()
        };
        let records = scan_gallery(dir.path(), &options, None).unwrap();
        assert_eq!(file_names(&records), ["a.jpg", "b.MP4"]);
    }

    #[test]
    fn test_scan_invalid_glob() {
        let dir = TempDir::new().unwrap();
        let options = ScanOptions {
            include: vec!["[".to_string()],
            ..ScanOptions::default()
        };
        let err = scan_gallery(dir.path(), &options, None).unwrap_err();
        assert!(matches!(err, GalpackError::Config(_)));
    }

    #[test]
    fn test_scan_missing_root() {
        let dir = TempDir::new().unwrap();
        let err =
            scan_gallery(&dir.path().join("nope"), &ScanOptions::default(), None).unwrap_err();
        assert!(matches!(err, GalpackError::ValidationError { .. }));
    }

    #[test]
    fn test_scan_reports_progress() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "a.jpg", 1, 10);
        write_file(dir.path(), "b.jpg", 1, 10);

        let pb = ProgressBar::hidden();
        scan_gallery(dir.path(), &ScanOptions::default(), Some(&pb)).unwrap();
        assert_eq!(pb.position(), 2);
    }
}
