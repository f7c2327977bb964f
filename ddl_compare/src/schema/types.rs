//! Type definitions for captured schema metadata

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{Error, Result};

/// The attributes of a single column as captured from the catalog
///
/// Table and column names are stored uppercase; catalogs are case-insensitive
/// by convention. Numeric attributes that do not apply to the column's type
/// (precision on a VARCHAR, length on a NUMBER) are `None`, which is distinct
/// from a genuine value of 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnAttributes {
    pub table_name: String,
    pub column_name: String,
    pub data_type: String,
    pub data_length: Option<u32>,
    pub data_precision: Option<u32>,
    pub data_scale: Option<i32>,
    pub nullable: bool,
    /// Position in the catalog's column ordering. Informational only, never
    /// part of the comparison.
    pub ordinal_position: u32,
}

impl ColumnAttributes {
    /// Create a new column record with the given identity and type
    pub fn new(table_name: &str, column_name: &str, data_type: &str) -> Self {
        Self {
            table_name: table_name.to_uppercase(),
            column_name: column_name.to_uppercase(),
            data_type: data_type.to_string(),
            data_length: None,
            data_precision: None,
            data_scale: None,
            nullable: true,
            ordinal_position: 0,
        }
    }

    /// Set the maximum character length
    pub fn length(mut self, length: u32) -> Self {
        self.data_length = Some(length);
        self
    }

    /// Set numeric precision and scale
    pub fn precision(mut self, precision: u32, scale: i32) -> Self {
        self.data_precision = Some(precision);
        self.data_scale = Some(scale);
        self
    }

    /// Set whether the column is nullable
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Set the catalog ordinal position
    pub fn position(mut self, position: u32) -> Self {
        self.ordinal_position = position;
        self
    }
}

/// One table's columns, in catalog ordinal order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub name: String,
    pub columns: Vec<ColumnAttributes>,
}

impl TableSnapshot {
    /// Create a new empty table snapshot
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_uppercase(),
            columns: Vec::new(),
        }
    }

    /// Append a column, preserving catalog order
    pub fn add_column(&mut self, column: ColumnAttributes) {
        self.columns.push(column);
    }

    /// Look up a column by its (uppercase) name
    pub fn column(&self, name: &str) -> Option<&ColumnAttributes> {
        self.columns.iter().find(|col| col.column_name == name)
    }
}

/// A point-in-time capture of one schema's tables and columns
///
/// Built once by the extraction layer and treated as immutable from then on;
/// the diff engine only ever borrows it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataSnapshot {
    pub tables: IndexMap<String, TableSnapshot>,
}

impl MetadataSnapshot {
    /// Create a new empty snapshot
    pub fn new() -> Self {
        Self {
            tables: IndexMap::new(),
        }
    }

    /// Add a table to the snapshot
    pub fn add_table(&mut self, table: TableSnapshot) -> Result<()> {
        if self.tables.contains_key(&table.name) {
            return Err(Error::DuplicateTable { table: table.name });
        }
        self.tables.insert(table.name.clone(), table);
        Ok(())
    }

    /// True when the capture returned no tables at all
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Total number of columns across all tables
    pub fn column_count(&self) -> usize {
        self.tables.values().map(|t| t.columns.len()).sum()
    }

    /// Check every snapshot invariant, reporting the first violation
    ///
    /// A snapshot that fails here must not be compared; the caller fixes
    /// extraction and retries the whole run.
    pub fn validate(&self) -> Result<()> {
        for (name, table) in &self.tables {
            if name.is_empty() || table.name.is_empty() {
                return Err(Error::EmptyTableName);
            }
            let mut seen = HashSet::new();
            for column in &table.columns {
                if column.column_name.is_empty() {
                    return Err(Error::EmptyColumnName {
                        table: table.name.clone(),
                    });
                }
                if !seen.insert(column.column_name.as_str()) {
                    return Err(Error::DuplicateColumn {
                        table: table.name.clone(),
                        column: column.column_name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
