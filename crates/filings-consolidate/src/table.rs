//! The consolidated per-company table and its merge operation.
//!
//! A [`ConsolidatedTable`] is a sparse matrix: rows indexed by
//! [`LineItemKey`], columns indexed by a filing-date label, cells holding an
//! optional numeric value. Absence is the default and legitimate state of a
//! cell; it is represented by the cell simply not existing, never by a
//! sentinel value.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

use filings_core::LineItemKey;

/// Sparse time-series table of resolved line-item values across filing dates.
///
/// Row and column sets grow monotonically as filings are merged; identity is
/// never reordered and previously written cells are only touched by a merge
/// writing to their own column.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedTable {
    row_order: Vec<LineItemKey>,
    column_order: Vec<String>,
    columns: HashSet<String>,
    cells: HashMap<LineItemKey, HashMap<String, f64>>,
}

impl ConsolidatedTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Row keys in insertion order.
    #[must_use]
    pub fn row_keys(&self) -> &[LineItemKey] {
        &self.row_order
    }

    /// Date labels in insertion order.
    #[must_use]
    pub fn date_labels(&self) -> &[String] {
        &self.column_order
    }

    /// Returns true if the table has a row for `key`.
    #[must_use]
    pub fn has_row(&self, key: &LineItemKey) -> bool {
        self.cells.contains_key(key)
    }

    /// Returns true if the table has a column for `date_label`.
    #[must_use]
    pub fn has_column(&self, date_label: &str) -> bool {
        self.columns.contains(date_label)
    }

    /// Value at (`key`, `date_label`), `None` when the cell is absent.
    #[must_use]
    pub fn value(&self, key: &LineItemKey, date_label: &str) -> Option<f64> {
        self.cells.get(key).and_then(|row| row.get(date_label)).copied()
    }

    /// Returns true if no filing has been merged yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.row_order.is_empty() && self.column_order.is_empty()
    }
}

/// Owns one company's [`ConsolidatedTable`] and folds filings into it.
#[derive(Clone, Debug, Default)]
pub struct FilingConsolidator {
    table: ConsolidatedTable,
}

impl FilingConsolidator {
    /// Creates a consolidator with an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges one filing's resolved line items under `date_label`.
    ///
    /// Keys not yet present become new rows, appended in first-seen order
    /// and absent in every existing column. A new `date_label` becomes a new
    /// column, absent in every row not written by this call. Every (key,
    /// value) pair is then written into its cell unconditionally: `Some`
    /// overwrites, `None` clears. Re-merging the same filing is therefore
    /// idempotent, and two filings sharing a date label overwrite each other
    /// column-wide; callers must keep labels unique per filing.
    ///
    /// An empty item list only adds the column.
    pub fn merge(&mut self, items: &[(LineItemKey, Option<f64>)], date_label: &str) {
        // New rows by set difference against the existing row-key set.
        for (key, _) in items {
            if !self.table.cells.contains_key(key) {
                self.table.row_order.push(key.clone());
                self.table.cells.insert(key.clone(), HashMap::new());
            }
        }

        if self.table.columns.insert(date_label.to_string()) {
            self.table.column_order.push(date_label.to_string());
        }

        for (key, value) in items {
            // Rows for every key were registered above.
            let row = self.table.cells.entry(key.clone()).or_default();
            match value {
                Some(v) => {
                    row.insert(date_label.to_string(), *v);
                }
                None => {
                    row.remove(date_label);
                }
            }
        }

        debug!(
            date_label,
            items = items.len(),
            rows = self.table.row_order.len(),
            columns = self.table.column_order.len(),
            "Merged filing into consolidated table"
        );
    }

    /// Borrows the consolidated table.
    #[must_use]
    pub const fn table(&self) -> &ConsolidatedTable {
        &self.table
    }

    /// Consumes the consolidator, handing the table to serialization.
    #[must_use]
    pub fn export(self) -> ConsolidatedTable {
        self.table
    }
}
