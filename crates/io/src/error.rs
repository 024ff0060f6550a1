use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum IoError {
    /// Target folder does not exist.
    FolderNotFound(PathBuf),
    /// Target path exists but is not a folder.
    NotAFolder(PathBuf),
    /// Folder holds no `.xlsx` files.
    NoWorkbooks(PathBuf),
    /// A required workbook (e.g. the selections file) is absent.
    WorkbookNotFound(PathBuf),
    /// Workbook could not be opened or parsed.
    Workbook { path: PathBuf, message: String },
    /// A sheet inside an opened workbook could not be read.
    Sheet { path: PathBuf, sheet: String, message: String },
    /// CSV serialization failure.
    Csv { path: PathBuf, source: csv::Error },
    /// Filesystem failure.
    Io { path: PathBuf, source: std::io::Error },
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FolderNotFound(path) => {
                write!(f, "the folder {} does not exist", path.display())
            }
            Self::NotAFolder(path) => write!(f, "{} is not a folder", path.display()),
            Self::NoWorkbooks(path) => {
                write!(f, "no Excel files found in {}", path.display())
            }
            Self::WorkbookNotFound(path) => write!(f, "{} not found", path.display()),
            Self::Workbook { path, message } => {
                write!(f, "failed to open Excel file {}: {message}", path.display())
            }
            Self::Sheet { path, sheet, message } => {
                write!(f, "failed to read sheet '{sheet}' in {}: {message}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "failed to write {}: {source}", path.display())
            }
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
        }
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Csv { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
