// Source file discovery
//
// Enumerates the Python files of a project, pruning a fixed set of build,
// cache and version-control directories.

use crate::error::Result;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Directory names never descended into, during discovery or resolution
pub const IGNORE_DIRS: &[&str] = &[
    "__pycache__",
    ".git",
    ".mypy_cache",
    ".pytest_cache",
    "build",
    "dist",
    "venv",
    ".idea",
    ".vscode",
];

/// Extension of analyzed source files
pub const SOURCE_EXTENSION: &str = "py";

/// Check whether any component of `relative` is an ignored directory name
pub fn should_ignore(relative: &Path) -> bool {
    relative.components().any(|c| match c {
        Component::Normal(name) => name.to_str().is_some_and(|n| IGNORE_DIRS.contains(&n)),
        _ => false,
    })
}

/// Enumerate every `.py` file under `root`, sorted by path.
///
/// Walk errors abort the enumeration.
pub fn discover_source_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_ignored_dir(entry, root));

    for entry in walker {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        if path.extension().map_or(true, |ext| ext != SOURCE_EXTENSION) {
            continue;
        }

        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

fn is_ignored_dir(entry: &DirEntry, root: &Path) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
    should_ignore(relative)
}
