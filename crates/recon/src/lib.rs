//! `dtrecon-recon`: datatype reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded row records, returns annotated
//! selections and the mismatching subset. No CLI or spreadsheet IO.

pub mod config;
pub mod engine;
pub mod error;
pub mod lookup;
pub mod model;

pub use config::ReconConfig;
pub use engine::{reconcile, resolve, run};
pub use error::ReconError;
pub use lookup::build_lookup;
pub use model::{
    CellValue, ContainerKey, ContainerTable, Lookup, LookupEntry, ReconInput, ReconResult,
    ReconSummary, Reconciliation, RowRecord, SELECTION_FIELDNAMES,
};
