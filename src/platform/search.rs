//! Recursive executable search used when a direct launch fails

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// First file under `roots` whose name contains `app` (case-insensitive) and
/// ends with `suffix`, in directory-walk order
///
/// Unreadable directories are skipped. Missing roots are ignored.
pub fn find_executable(roots: &[PathBuf], app: &str, suffix: &str) -> Option<PathBuf> {
    let needle = app.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    let suffix = suffix.to_lowercase();

    roots
        .iter()
        .filter(|root| root.is_dir())
        .find_map(|root| search_root(root, &needle, &suffix))
}

fn search_root(root: &Path, needle: &str, suffix: &str) -> Option<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .flatten()
        .filter(|entry| entry.file_type().is_file())
        .find(|entry| {
            let name = entry.file_name().to_string_lossy().to_lowercase();
            name.ends_with(suffix) && name.contains(needle)
        })
        .map(|entry| entry.into_path())
}
