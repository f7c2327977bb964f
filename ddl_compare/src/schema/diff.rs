//! Schema diff engine
//!
//! Reduces two metadata snapshots into a report-ready comparison result.

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

use crate::error::Result;
use crate::schema::compare::{compare_columns, AttributeMismatch};
use crate::schema::types::{ColumnAttributes, MetadataSnapshot, TableSnapshot};

/// A column present in both schemas with at least one differing attribute
///
/// One entry per column: all differing attributes are bundled into the
/// nested mismatch list rather than emitted as separate entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDiff {
    pub table_name: String,
    pub column_name: String,
    pub mismatches: Vec<AttributeMismatch>,
}

/// Summary counts derived from a comparison result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComparisonSummary {
    pub diff_columns: usize,
    pub only_in_primary: usize,
    pub only_in_secondary: usize,
}

/// The aggregated outcome of comparing two snapshots
///
/// Each sequence is sorted by (table name, column name) ascending, regardless
/// of the order either catalog returned its rows, so two runs over the same
/// snapshots produce byte-identical reports.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ComparisonResult {
    pub diff_columns: Vec<ColumnDiff>,
    pub only_in_primary: Vec<ColumnAttributes>,
    pub only_in_secondary: Vec<ColumnAttributes>,
}

impl ComparisonResult {
    /// Compare two snapshots and produce the classified differences
    ///
    /// Both snapshots are validated first; a structural violation (duplicate
    /// column identity, empty table name) aborts the call before any entry is
    /// produced. There are no partial results. The engine holds no state and
    /// never mutates its inputs, so independent comparisons may run
    /// concurrently.
    pub fn generate(
        primary: &MetadataSnapshot,
        secondary: &MetadataSnapshot,
    ) -> Result<Self> {
        primary.validate()?;
        secondary.validate()?;

        let mut result = ComparisonResult::default();

        let table_names: BTreeSet<&str> = primary
            .tables
            .keys()
            .chain(secondary.tables.keys())
            .map(String::as_str)
            .collect();

        for table_name in table_names {
            match (
                primary.tables.get(table_name),
                secondary.tables.get(table_name),
            ) {
                (Some(primary_table), Some(secondary_table)) => {
                    result.compare_shared_table(primary_table, secondary_table);
                }
                (Some(primary_table), None) => {
                    // Whole table missing from the secondary schema: degrade
                    // to per-column entries so the result shape stays uniform.
                    push_all_columns(&mut result.only_in_primary, primary_table);
                }
                (None, Some(secondary_table)) => {
                    push_all_columns(&mut result.only_in_secondary, secondary_table);
                }
                (None, None) => unreachable!("table name came from the union"),
            }
        }

        Ok(result)
    }

    fn compare_shared_table(&mut self, primary: &TableSnapshot, secondary: &TableSnapshot) {
        let primary_columns: HashMap<&str, &ColumnAttributes> = primary
            .columns
            .iter()
            .map(|col| (col.column_name.as_str(), col))
            .collect();
        let secondary_columns: HashMap<&str, &ColumnAttributes> = secondary
            .columns
            .iter()
            .map(|col| (col.column_name.as_str(), col))
            .collect();

        let column_names: BTreeSet<&str> = primary_columns
            .keys()
            .chain(secondary_columns.keys())
            .copied()
            .collect();

        for column_name in column_names {
            match (
                primary_columns.get(column_name),
                secondary_columns.get(column_name),
            ) {
                (Some(primary_col), Some(secondary_col)) => {
                    let mismatches = compare_columns(primary_col, secondary_col);
                    if !mismatches.is_empty() {
                        self.diff_columns.push(ColumnDiff {
                            table_name: primary.name.clone(),
                            column_name: column_name.to_string(),
                            mismatches,
                        });
                    }
                }
                (Some(primary_col), None) => {
                    self.only_in_primary.push((*primary_col).clone());
                }
                (None, Some(secondary_col)) => {
                    self.only_in_secondary.push((*secondary_col).clone());
                }
                (None, None) => unreachable!("column name came from the union"),
            }
        }
    }

    /// Check if the comparison found no differences at all
    pub fn is_empty(&self) -> bool {
        self.diff_columns.is_empty()
            && self.only_in_primary.is_empty()
            && self.only_in_secondary.is_empty()
    }

    /// Derive the per-category counts
    pub fn summary(&self) -> ComparisonSummary {
        ComparisonSummary {
            diff_columns: self.diff_columns.len(),
            only_in_primary: self.only_in_primary.len(),
            only_in_secondary: self.only_in_secondary.len(),
        }
    }
}

/// Emit every column of a one-sided table, sorted by column name
fn push_all_columns(entries: &mut Vec<ColumnAttributes>, table: &TableSnapshot) {
    let mut columns = table.columns.clone();
    columns.sort_by(|a, b| a.column_name.cmp(&b.column_name));
    entries.extend(columns);
}
