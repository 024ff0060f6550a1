use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

// ---------------------------------------------------------------------------
// Cells + rows
// ---------------------------------------------------------------------------

/// A single spreadsheet cell, after formulas have been resolved to their
/// cached result.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Text rendering used for keys and CSV output.
    pub fn to_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(s) => s.clone(),
            // Integers without decimals
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            Self::Number(n) => format!("{}", n),
            Self::Bool(b) => if *b { "True" } else { "False" }.to_string(),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// Field that carries the originating sheet name on every loaded record.
pub const SHEET_FIELD: &str = "Sheet";

/// One data row of a worksheet, keyed by header name.
///
/// Column presence matters: a header that exists with a blank cell is
/// `Some(CellValue::Empty)`, a header that does not exist is `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowRecord {
    pub fields: HashMap<String, CellValue>,
}

impl RowRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(header, cell)` pairs and tag it with `sheet`.
    /// Duplicate headers keep the last cell; the sheet tag always wins over
    /// a literal `Sheet` column.
    pub fn from_sheet_row<I, K>(sheet: &str, cells: I) -> Self
    where
        I: IntoIterator<Item = (K, CellValue)>,
        K: Into<String>,
    {
        let mut fields: HashMap<String, CellValue> =
            cells.into_iter().map(|(k, v)| (k.into(), v)).collect();
        fields.insert(SHEET_FIELD.to_string(), CellValue::Text(sheet.to_string()));
        Self { fields }
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.fields.get(field)
    }

    /// Text of `field`, or empty text when the column is absent.
    pub fn text(&self, field: &str) -> String {
        self.fields.get(field).map(CellValue::to_text).unwrap_or_default()
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<CellValue>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn sheet(&self) -> Option<String> {
        self.get(SHEET_FIELD).map(CellValue::to_text)
    }
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Composite key = (name, container). Both parts may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerKey {
    pub name: String,
    pub container: String,
}

impl ContainerKey {
    pub fn new(name: impl Into<String>, container: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            container: container.into(),
        }
    }
}

impl std::fmt::Display for ContainerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.name, self.container)
    }
}

/// Where a key's datatype was declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupEntry {
    pub datatype: String,
    pub file: String,
    pub sheet: String,
}

impl LookupEntry {
    /// Placeholder triple for keys that resolve nowhere.
    pub fn unknown(sentinel: &str) -> Self {
        Self {
            datatype: sentinel.to_string(),
            file: sentinel.to_string(),
            sheet: sentinel.to_string(),
        }
    }
}

/// Key → entry table built from one container workbook.
///
/// At most one entry per key; iteration is in key order.
#[derive(Debug, Clone, Default)]
pub struct Lookup {
    pub source_file: String,
    pub entries: BTreeMap<ContainerKey, LookupEntry>,
}

impl Lookup {
    pub fn new(source_file: impl Into<String>) -> Self {
        Self {
            source_file: source_file.into(),
            entries: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &ContainerKey) -> Option<&LookupEntry> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ContainerKey, &LookupEntry)> {
        self.entries.iter()
    }
}

// ---------------------------------------------------------------------------
// Selections
// ---------------------------------------------------------------------------

pub const IN_NAME: &str = "In_Name";
pub const IN_CONTAINER: &str = "In_Container";
pub const IN_DATATYPE: &str = "In_Datatype";
pub const IN_FILE: &str = "In_File";
pub const IN_SHEET: &str = "In_Sheet";
pub const OUT_NAME: &str = "Out_Name";
pub const OUT_CONTAINER: &str = "Out_Container";
pub const OUT_DATATYPE: &str = "Out_Datatype";
pub const OUT_FILE: &str = "Out_File";
pub const OUT_SHEET: &str = "Out_Sheet";

/// Column order of both output tables.
pub const SELECTION_FIELDNAMES: [&str; 10] = [
    IN_NAME,
    IN_CONTAINER,
    IN_DATATYPE,
    IN_FILE,
    IN_SHEET,
    OUT_NAME,
    OUT_CONTAINER,
    OUT_DATATYPE,
    OUT_FILE,
    OUT_SHEET,
];

// ---------------------------------------------------------------------------
// Input + Output
// ---------------------------------------------------------------------------

/// Pre-loaded rows for one container workbook.
#[derive(Debug, Clone)]
pub struct ContainerTable {
    /// Label recorded as `In_File` / `Out_File` (the file name, not the path).
    pub file: String,
    pub rows: Vec<RowRecord>,
}

/// Everything the engine needs: container tables in resolution order plus
/// the selection rows.
#[derive(Debug, Clone, Default)]
pub struct ReconInput {
    pub containers: Vec<ContainerTable>,
    pub selections: Vec<RowRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconSummary {
    pub selections: usize,
    pub mismatches: usize,
    pub unresolved_inputs: usize,
    pub unresolved_outputs: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub engine_version: String,
    pub run_at: String,
    pub lookup_entries: usize,
}

/// Annotated selections in input order, plus the mismatching subset.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub rows: Vec<RowRecord>,
    pub mismatches: Vec<RowRecord>,
    pub summary: ReconSummary,
}

#[derive(Debug, Clone)]
pub struct ReconResult {
    pub meta: ReconMeta,
    pub reconciliation: Reconciliation,
}
