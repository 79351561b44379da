use std::path::{Path, PathBuf};

/// Where phone manufacturers put camera output, most common first.
pub const COMMON_CAMERA_PATHS: &[&str] = &[
    "/storage/emulated/0/DCIM/Camera",
    "/storage/emulated/0/DCIM",
    "/storage/emulated/0/Pictures",
    "/storage/emulated/0/Pictures/Camera",
    "/storage/emulated/0/Camera",
];

/// First candidate that is an existing directory.
pub fn first_existing_dir<P: AsRef<Path>>(candidates: &[P]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|p| p.as_ref())
        .find(|path: &&Path| path.is_dir())
        .map(Path::to_path_buf)
}

/// Locate the device's gallery folder, if this looks like an Android device.
pub fn detect_gallery_folder() -> Option<PathBuf> {
    let found = first_existing_dir(COMMON_CAMERA_PATHS);
    match &found {
        Some(path) => tracing::debug!("Detected gallery folder at {}", path.display()),
        None => tracing::debug!("No common gallery folder found"),
    }
    found
}
