// Excel workbook import (xlsx, xls, xlsb, ods) into header-keyed row records
//
// Cell values are the cached results calamine reports; formula text is never
// read.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use dtrecon_recon::{CellValue, RowRecord};

use crate::error::IoError;

/// Read every sheet of a workbook into row records.
///
/// Row 1 of each sheet is the header. Every following row becomes one record
/// keyed by header text and tagged with the sheet name. Blank header cells
/// drop their column, so a sheet whose row 1 is blank yields records that
/// carry only the sheet tag.
pub fn load_rows(path: &Path) -> Result<Vec<RowRecord>, IoError> {
    log::info!("Reading file: {}", path.display());

    let mut workbook: Sheets<_> = open_workbook_auto(path).map_err(|e| IoError::Workbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let mut records = Vec::new();

    for sheet_name in &sheet_names {
        let range = workbook
            .worksheet_range(sheet_name)
            .map_err(|e| IoError::Sheet {
                path: path.to_path_buf(),
                sheet: sheet_name.clone(),
                message: e.to_string(),
            })?;

        // Range start offset (data may not begin at row 1)
        let Some((start_row, _)) = range.start() else {
            log::debug!("Sheet '{}' is empty", sheet_name);
            continue;
        };

        let mut rows = range.rows();
        let headers: Vec<Option<String>> = if start_row == 0 {
            match rows.next() {
                Some(header_row) => header_row
                    .iter()
                    .map(|cell| {
                        let text = cell_value(cell).to_text();
                        (!text.is_empty()).then_some(text)
                    })
                    .collect(),
                None => Vec::new(),
            }
        } else {
            // Row 1 is blank: no named columns, every used row is data
            Vec::new()
        };

        let before = records.len();
        for row in rows {
            let cells = headers
                .iter()
                .zip(row.iter())
                .filter_map(|(header, cell)| header.as_ref().map(|h| (h.as_str(), cell_value(cell))));
            records.push(RowRecord::from_sheet_row(sheet_name, cells));
        }

        log::debug!(
            "Sheet '{}': {} columns, {} rows",
            sheet_name,
            headers.iter().flatten().count(),
            records.len() - before
        );
    }

    log::info!("Read {} rows from {}", records.len(), path.display());
    Ok(records)
}

/// Convert a calamine cell into the engine's value type.
pub fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        // Store error as text representation
        Data::Error(e) => CellValue::Text(format!("#{:?}", e)),
        // Serial date number; the 1900 date system is assumed
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}
