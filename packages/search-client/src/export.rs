//! CSV export of aggregated rows.
//!
//! Cells holding a comma, quote or line break are quoted with inner quotes
//! doubled; phone and taxonomy lists contain commas routinely.

use npi_registry::{NormalizedRow, COLUMN_HEADERS};
use std::io::Write;
use std::path::Path;

use crate::error::{ClientError, Result};

/// Render rows as CSV with a header line.
pub fn to_csv(rows: &[NormalizedRow]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    write_rows(&mut writer, rows)?;

    let bytes = writer
        .into_inner()
        .map_err(|e| ClientError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ClientError::Export(e.to_string()))
}

/// Write rows as CSV to `path`, replacing any existing file.
pub fn write_csv(path: impl AsRef<Path>, rows: &[NormalizedRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    write_rows(&mut writer, rows)
}

fn write_rows<W: Write>(writer: &mut csv::Writer<W>, rows: &[NormalizedRow]) -> Result<()> {
    writer.write_record(COLUMN_HEADERS)?;
    for row in rows {
        writer.write_record(row.fields())?;
    }
    writer
        .flush()
        .map_err(|e| ClientError::Export(e.to_string()))
}
