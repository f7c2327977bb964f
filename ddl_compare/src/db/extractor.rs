//! Catalog metadata extraction
//!
//! Queries `information_schema.columns` for the configured schemas and
//! materializes a `MetadataSnapshot`. The snapshot handed back is complete
//! and validated; a failure anywhere surfaces as an error instead of a
//! partially populated capture.

use async_trait::async_trait;
use sqlx::{FromRow, MySql, Pool, Postgres};

use crate::db::connection::DatabaseConnection;
use crate::error::Result;
use crate::schema::types::{ColumnAttributes, MetadataSnapshot, TableSnapshot};

/// Metadata source trait, one implementation per driver
#[async_trait]
pub trait MetadataSource {
    /// Capture column metadata for the given (uppercase) schema names
    async fn fetch_columns(&self, schemas: &[String]) -> Result<Vec<ColumnMetadataRow>>;
}

/// One row of column metadata as returned by the catalog
#[derive(Debug, FromRow)]
pub struct ColumnMetadataRow {
    pub table_name: String,
    pub column_name: String,
    pub data_type: String,
    pub data_length: Option<i64>,
    pub data_precision: Option<i64>,
    pub data_scale: Option<i64>,
    pub is_nullable: String,
    pub ordinal_position: i64,
}

/// Captures metadata snapshots from one database
pub struct MetadataExtractor {
    connection: DatabaseConnection,
    label: String,
}

impl MetadataExtractor {
    /// Create a new extractor over an established connection
    pub fn new(connection: DatabaseConnection, label: &str) -> Self {
        Self {
            connection,
            label: label.to_string(),
        }
    }

    /// Label used in log lines
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Capture a validated snapshot of the configured schemas
    pub async fn snapshot(&self, schemas: &[String]) -> Result<MetadataSnapshot> {
        tracing::info!(
            label = %self.label,
            schemas = ?schemas,
            "Fetching column metadata"
        );

        let rows = match &self.connection {
            DatabaseConnection::Postgres(pool) => {
                PostgresSource { pool }.fetch_columns(schemas).await?
            }
            DatabaseConnection::MySql(pool) => {
                MySqlSource { pool }.fetch_columns(schemas).await?
            }
        };

        tracing::info!(label = %self.label, rows = rows.len(), "Fetched column metadata");

        let snapshot = build_snapshot(rows);
        snapshot.validate()?;
        Ok(snapshot)
    }
}

/// Fold ordered catalog rows into per-table snapshots
fn build_snapshot(rows: Vec<ColumnMetadataRow>) -> MetadataSnapshot {
    let mut snapshot = MetadataSnapshot::new();

    for row in rows {
        let table_name = row.table_name.to_uppercase();
        let column = ColumnAttributes {
            table_name: table_name.clone(),
            column_name: row.column_name.to_uppercase(),
            data_type: row.data_type,
            data_length: row.data_length.and_then(|v| u32::try_from(v).ok()),
            data_precision: row.data_precision.and_then(|v| u32::try_from(v).ok()),
            data_scale: row.data_scale.and_then(|v| i32::try_from(v).ok()),
            nullable: matches!(row.is_nullable.as_str(), "YES" | "Y"),
            ordinal_position: u32::try_from(row.ordinal_position).unwrap_or(0),
        };

        snapshot
            .tables
            .entry(table_name.clone())
            .or_insert_with(|| TableSnapshot::new(&table_name))
            .add_column(column);
    }

    snapshot
}

/// PostgreSQL metadata source
struct PostgresSource<'a> {
    pool: &'a Pool<Postgres>,
}

#[async_trait]
impl<'a> MetadataSource for PostgresSource<'a> {
    async fn fetch_columns(&self, schemas: &[String]) -> Result<Vec<ColumnMetadataRow>> {
        let sql = r#"
            SELECT
                table_name::text               AS table_name,
                column_name::text              AS column_name,
                data_type::text                AS data_type,
                character_maximum_length::int8 AS data_length,
                numeric_precision::int8        AS data_precision,
                numeric_scale::int8            AS data_scale,
                is_nullable::text              AS is_nullable,
                ordinal_position::int8         AS ordinal_position
            FROM information_schema.columns
            WHERE table_schema NOT IN ('pg_catalog', 'information_schema')
              AND upper(table_schema::text) = ANY($1)
            ORDER BY table_name, ordinal_position
        "#;

        let rows = sqlx::query_as::<_, ColumnMetadataRow>(sql)
            .bind(schemas)
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }
}

/// MySQL metadata source
struct MySqlSource<'a> {
    pool: &'a Pool<MySql>,
}

#[async_trait]
impl<'a> MetadataSource for MySqlSource<'a> {
    async fn fetch_columns(&self, schemas: &[String]) -> Result<Vec<ColumnMetadataRow>> {
        // MySQL cannot bind an IN list, so the schema filter is rendered
        // inline; names come from config and were uppercased already.
        let schema_list = schemas
            .iter()
            .map(|s| format!("'{}'", s.replace('\'', "''")))
            .collect::<Vec<_>>()
            .join(", ");

        let sql = format!(
            r#"
            SELECT
                table_name                                AS table_name,
                column_name                               AS column_name,
                data_type                                 AS data_type,
                CAST(character_maximum_length AS SIGNED)  AS data_length,
                CAST(numeric_precision AS SIGNED)         AS data_precision,
                CAST(numeric_scale AS SIGNED)             AS data_scale,
                is_nullable                               AS is_nullable,
                CAST(ordinal_position AS SIGNED)          AS ordinal_position
            FROM information_schema.columns
            WHERE table_schema NOT IN ('mysql', 'information_schema', 'performance_schema', 'sys')
              AND upper(table_schema) IN ({})
            ORDER BY table_name, ordinal_position
            "#,
            schema_list
        );

        let rows = sqlx::query_as::<_, ColumnMetadataRow>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(table: &str, column: &str, position: i64) -> ColumnMetadataRow {
        ColumnMetadataRow {
            table_name: table.to_string(),
            column_name: column.to_string(),
            data_type: "VARCHAR".to_string(),
            data_length: Some(20),
            data_precision: None,
            data_scale: None,
            is_nullable: "YES".to_string(),
            ordinal_position: position,
        }
    }

    #[test]
    fn build_snapshot_groups_rows_by_table() {
        let rows = vec![
            row("emp", "id", 1),
            row("emp", "name", 2),
            row("dept", "id", 1),
        ];

        let snapshot = build_snapshot(rows);

        assert_eq!(snapshot.tables.len(), 2);
        assert_eq!(snapshot.tables["EMP"].columns.len(), 2);
        assert_eq!(snapshot.tables["EMP"].columns[0].column_name, "ID");
        assert_eq!(snapshot.tables["DEPT"].columns.len(), 1);
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn build_snapshot_uppercases_identities() {
        let snapshot = build_snapshot(vec![row("Emp_Common", "Salary", 1)]);
        let table = &snapshot.tables["EMP_COMMON"];
        assert_eq!(table.name, "EMP_COMMON");
        assert_eq!(table.columns[0].column_name, "SALARY");
    }
}
