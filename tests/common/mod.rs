//! Common test utilities and fixtures for integration tests.

#![allow(dead_code)]

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

/// 2023-01-01T12:00:00Z
pub const JAN_1_2023: u64 = 1_672_574_400;
pub const DAY: u64 = 86_400;

/// Creates a temporary directory for test fixtures.
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Writes `size` bytes to `root/rel` and sets its modification time.
pub fn write_media(root: &Path, rel: &str, size: usize, mtime_secs: u64) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directories");
    }
    std::fs::write(&path, vec![0u8; size]).expect("Failed to write file");
    File::options()
        .write(true)
        .open(&path)
        .and_then(|f| f.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(mtime_secs)))
        .expect("Failed to set modification time");
    path
}

/// Creates a gallery of `(name, size, mtime)` files and returns its root.
pub fn create_gallery(dir: &TempDir, files: &[(&str, usize, u64)]) -> PathBuf {
    let root = dir.path().to_path_buf();
    for (name, size, mtime) in files {
        write_media(&root, name, *size, *mtime);
    }
    root
}

/// Four files that split into 9 | 3 | 8 bytes at capacity 10, one per day.
pub fn sample_gallery_files() -> Vec<(&'static str, usize, u64)> {
    vec![
        ("IMG_0004.jpg", 8, JAN_1_2023 + 3 * DAY),
        ("IMG_0001.jpg", 4, JAN_1_2023),
        ("IMG_0003.jpg", 3, JAN_1_2023 + 2 * DAY),
        ("IMG_0002.jpg", 5, JAN_1_2023 + DAY),
    ]
}

/// Names of the entries directly under `dir`, sorted.
pub fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to read directory")
        .map(|e| {
            e.expect("Failed to read entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}

/// Runs the galpack binary isolated from the developer's config and environment.
pub fn galpack() -> assert_cmd::Command {
    let home = Path::new(env!("CARGO_TARGET_TMPDIR")).join("galpack-home");
    let mut cmd = assert_cmd::Command::new(env!("CARGO_BIN_EXE_galpack"));
    for (key, _) in std::env::vars_os() {
        if key.to_string_lossy().starts_with("GALPACK") {
            cmd.env_remove(key);
        }
    }
    cmd.env_remove("RUST_LOG")
        .env("HOME", &home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("APPDATA", &home);
    cmd
}
