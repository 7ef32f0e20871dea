//! CSV serialization of consolidated tables.
//!
//! One artifact per company: a rectangular table whose first two columns are
//! `tag` and `stmt`, followed by one column per filing-date label, with
//! numeric or empty cells.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::debug;

use filings_core::{FilingsError, Result};

use crate::table::ConsolidatedTable;

/// Writes `table` as CSV to `writer`.
///
/// Rows appear in insertion order; absent cells serialize as empty fields.
pub fn write_csv<W: Write>(table: &ConsolidatedTable, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec!["tag".to_string(), "stmt".to_string()];
    header.extend(table.date_labels().iter().cloned());
    csv_writer
        .write_record(&header)
        .map_err(|e| FilingsError::Export(e.to_string()))?;

    for key in table.row_keys() {
        let mut record = vec![key.tag.clone(), key.statement.code().to_string()];
        for label in table.date_labels() {
            record.push(
                table
                    .value(key, label)
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
            );
        }
        csv_writer
            .write_record(&record)
            .map_err(|e| FilingsError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| FilingsError::Export(e.to_string()))?;
    Ok(())
}

/// Writes `table` as CSV to a file at `path`.
pub fn export_csv(table: &ConsolidatedTable, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| FilingsError::Export(e.to_string()))?;
    write_csv(table, file)?;
    debug!(
        path = %path.display(),
        rows = table.row_keys().len(),
        columns = table.date_labels().len(),
        "Exported consolidated table"
    );
    Ok(())
}
