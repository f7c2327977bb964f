//! Column attribute comparison
//!
//! Compares two column records that share (table, column) identity and
//! describes every attribute that differs between them.

use serde::Serialize;
use std::fmt;

use crate::schema::types::ColumnAttributes;

/// The comparable attributes of a column
///
/// `ordinal_position` is deliberately absent: column order is informational
/// and never a difference worth reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnAttribute {
    DataType,
    DataLength,
    DataPrecision,
    DataScale,
    Nullable,
}

impl fmt::Display for ColumnAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnAttribute::DataType => "data_type",
            ColumnAttribute::DataLength => "data_length",
            ColumnAttribute::DataPrecision => "data_precision",
            ColumnAttribute::DataScale => "data_scale",
            ColumnAttribute::Nullable => "nullable",
        };
        write!(f, "{}", name)
    }
}

/// One differing attribute with the value from each side
///
/// `None` means the attribute does not apply on that side (e.g. precision of
/// a VARCHAR column). Nullability is rendered `Y`/`N`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeMismatch {
    pub attribute: ColumnAttribute,
    pub primary: Option<String>,
    pub secondary: Option<String>,
}

/// Compare two columns attribute by attribute
///
/// Returns an empty vector when the columns are equivalent. Divergence is
/// data, not failure: this function cannot error. Mismatches come back in a
/// fixed attribute order so reports stay stable.
///
/// Type names are compared case-insensitively; the numeric attributes use
/// exact `Option` equality, so an absent value only ever equals another
/// absent value. There are no tolerance windows: precision 10 vs 8 is a
/// mismatch, which is exactly the drift signal this tool exists to catch.
pub fn compare_columns(
    primary: &ColumnAttributes,
    secondary: &ColumnAttributes,
) -> Vec<AttributeMismatch> {
    let mut mismatches = Vec::new();

    if !primary.data_type.eq_ignore_ascii_case(&secondary.data_type) {
        mismatches.push(AttributeMismatch {
            attribute: ColumnAttribute::DataType,
            primary: Some(primary.data_type.clone()),
            secondary: Some(secondary.data_type.clone()),
        });
    }

    if primary.data_length != secondary.data_length {
        mismatches.push(AttributeMismatch {
            attribute: ColumnAttribute::DataLength,
            primary: primary.data_length.map(|v| v.to_string()),
            secondary: secondary.data_length.map(|v| v.to_string()),
        });
    }

    if primary.data_precision != secondary.data_precision {
        mismatches.push(AttributeMismatch {
            attribute: ColumnAttribute::DataPrecision,
            primary: primary.data_precision.map(|v| v.to_string()),
            secondary: secondary.data_precision.map(|v| v.to_string()),
        });
    }

    if primary.data_scale != secondary.data_scale {
        mismatches.push(AttributeMismatch {
            attribute: ColumnAttribute::DataScale,
            primary: primary.data_scale.map(|v| v.to_string()),
            secondary: secondary.data_scale.map(|v| v.to_string()),
        });
    }

    if primary.nullable != secondary.nullable {
        mismatches.push(AttributeMismatch {
            attribute: ColumnAttribute::Nullable,
            primary: Some(render_nullable(primary.nullable)),
            secondary: Some(render_nullable(secondary.nullable)),
        });
    }

    mismatches
}

/// True when the two columns have no differing attributes
pub fn columns_equal(primary: &ColumnAttributes, secondary: &ColumnAttributes) -> bool {
    compare_columns(primary, secondary).is_empty()
}

fn render_nullable(nullable: bool) -> String {
    if nullable { "Y" } else { "N" }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn varchar_col(length: u32) -> ColumnAttributes {
        ColumnAttributes::new("T", "C", "VARCHAR2")
            .length(length)
            .nullable(false)
    }

    #[test]
    fn identical_columns_have_no_mismatches() {
        let a = varchar_col(20);
        let b = varchar_col(20);
        assert!(columns_equal(&a, &b));
    }

    #[test]
    fn type_comparison_is_case_insensitive() {
        let a = ColumnAttributes::new("T", "C", "varchar2");
        let b = ColumnAttributes::new("T", "C", "VARCHAR2");
        assert!(columns_equal(&a, &b));
    }

    #[test]
    fn absent_precision_differs_from_zero() {
        let a = ColumnAttributes::new("T", "C", "NUMBER");
        let b = ColumnAttributes::new("T", "C", "NUMBER").precision(0, 0);
        let mismatches = compare_columns(&a, &b);
        assert_eq!(mismatches.len(), 2);
        assert_eq!(mismatches[0].attribute, ColumnAttribute::DataPrecision);
        assert_eq!(mismatches[0].primary, None);
        assert_eq!(mismatches[0].secondary, Some("0".to_string()));
    }

    #[test]
    fn ordinal_position_is_ignored() {
        let a = varchar_col(20).position(1);
        let b = varchar_col(20).position(7);
        assert!(columns_equal(&a, &b));
    }

    #[test]
    fn nullability_mismatch_renders_y_n() {
        let a = varchar_col(20).nullable(true);
        let b = varchar_col(20).nullable(false);
        let mismatches = compare_columns(&a, &b);
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].primary, Some("Y".to_string()));
        assert_eq!(mismatches[0].secondary, Some("N".to_string()));
    }
}
