// Spreadsheet I/O: container discovery, Excel import, CSV export

pub mod csv;
pub mod discovery;
pub mod error;
pub mod xlsx;

pub use discovery::{file_label, list_workbooks};
pub use error::IoError;
