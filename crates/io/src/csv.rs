// CSV export of annotated rows

use std::path::Path;

use dtrecon_recon::RowRecord;

use crate::error::IoError;

/// Write `rows` to `path` with a fixed column set.
///
/// The header is always written, even with no rows. Fields not in
/// `fieldnames` are dropped; listed fields a row lacks are written empty.
pub fn write_rows(path: &Path, fieldnames: &[&str], rows: &[RowRecord]) -> Result<(), IoError> {
    log::info!("Writing file: {}", path.display());

    let csv_err = |source| IoError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b',')
        .from_path(path)
        .map_err(csv_err)?;

    writer.write_record(fieldnames).map_err(csv_err)?;

    for row in rows {
        let record: Vec<String> = fieldnames.iter().map(|field| row.text(field)).collect();
        writer.write_record(&record).map_err(csv_err)?;
    }

    writer.flush().map_err(|source| IoError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}
