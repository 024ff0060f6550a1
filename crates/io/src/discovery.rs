// Container workbook discovery

use std::path::{Path, PathBuf};

use crate::error::IoError;

pub const WORKBOOK_SUFFIX: &str = ".xlsx";

/// List the `.xlsx` files directly inside `folder`, sorted by file name.
///
/// Only regular files count; the suffix match is case-sensitive. An existing
/// folder with no matches is an error.
pub fn list_workbooks(folder: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !folder.exists() {
        return Err(IoError::FolderNotFound(folder.to_path_buf()));
    }
    if !folder.is_dir() {
        return Err(IoError::NotAFolder(folder.to_path_buf()));
    }

    let io_err = |source| IoError::Io {
        path: folder.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(folder).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if !path.is_file() {
            continue;
        }

        let is_workbook = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(WORKBOOK_SUFFIX));

        if is_workbook {
            log::debug!("Found workbook: {}", path.display());
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(IoError::NoWorkbooks(folder.to_path_buf()));
    }

    // Resolution order across files follows this order
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

/// File-name label for a workbook path (what ends up in `In_File`/`Out_File`).
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
