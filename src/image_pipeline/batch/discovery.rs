use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::image_pipeline::common::error::{ConversionError, Result};

/// True when the file name ends with any of `extensions`, ignoring case.
pub fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.to_string_lossy().to_lowercase();
    extensions
        .iter()
        .any(|ext| name.ends_with(&ext.to_lowercase()))
}

/// Recursively collects matching files under `dir`, sorted by path.
pub fn discover_files(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        ConversionError::InputReadError(format!("{}: {}", dir.display(), e))
    })?;

    let mut files = Vec::new();
    collect(entries, extensions, &mut files);
    files.sort();

    debug!("Found {} file(s) in {}", files.len(), dir.display());
    Ok(files)
}

fn collect(entries: std::fs::ReadDir, extensions: &[String], files: &mut Vec<PathBuf>) {
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Error reading directory entry: {}", e);
                continue;
            }
        };
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            match std::fs::read_dir(&path) {
                Ok(sub) => collect(sub, extensions, files),
                Err(e) => warn!("Cannot read directory {}: {}", path.display(), e),
            }
        } else if (file_type.is_file() || path.is_file()) && matches_extension(&path, extensions) {
            files.push(path);
        }
    }
}
