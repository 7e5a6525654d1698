//! Folder enumeration.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::error::{PdfVolError, Result};
use crate::source::{SourceFile, sort_by_key};

/// List the regular files in `folder` whose name ends with `.<extension>`.
///
/// The listing is not recursive, skips hidden files and matches the
/// extension case-sensitively. Paths come back in alphabetical order.
///
/// # Errors
///
/// - `FolderNotFound` when `folder` does not exist
/// - `NotADirectory` when `folder` is a file
/// - `InvalidConfig` when the folder path is not valid UTF-8
pub fn scan_folder(folder: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !folder.try_exists()? {
        return Err(PdfVolError::folder_not_found(folder.to_path_buf()));
    }

    if !folder.is_dir() {
        return Err(PdfVolError::NotADirectory {
            path: folder.to_path_buf(),
        });
    }

    let pattern = folder_pattern(folder, extension)?;
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };

    let mut paths = Vec::new();
    for entry in glob::glob_with(&pattern, options)? {
        let path = entry?;
        if path.is_file() {
            paths.push(path);
        }
    }

    tracing::debug!(pattern = %pattern, found = paths.len(), "scanned folder");
    Ok(paths)
}

/// Scan `folder` and order the result by numeric key.
pub fn collect_sources(folder: &Path, extension: &str) -> Result<Vec<SourceFile>> {
    let mut files: Vec<SourceFile> = scan_folder(folder, extension)?
        .into_iter()
        .map(SourceFile::new)
        .collect();
    sort_by_key(&mut files);
    Ok(files)
}

fn folder_pattern(folder: &Path, extension: &str) -> Result<String> {
    let folder = folder.to_str().ok_or_else(|| {
        PdfVolError::invalid_config(format!(
            "Folder path is not valid UTF-8: {}",
            folder.display()
        ))
    })?;
    let extension = extension.trim_start_matches('.');

    Ok(format!(
        "{}/*.{}",
        Pattern::escape(folder.trim_end_matches('/')),
        Pattern::escape(extension)
    ))
}
