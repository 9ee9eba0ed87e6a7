//! SQL query builders.
//!
//! Generates the DDL and the per-report INSERT for the `stats` table.
//! Statement text is assembled only from [`Column`] names and dialect
//! placeholders; report data always travels as bound values.

use crate::storage::dialect::Backend;
use crate::storage::models::{Column, SqlValue, StatsRecord, STATS_TABLE};

/// A parameterized INSERT and the values to bind, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertStatement {
    pub sql: String,
    pub columns: Vec<Column>,
    pub values: Vec<SqlValue>,
}

/// Placeholders for `count` bound values.
pub fn placeholders(backend: Backend, count: usize) -> Vec<String> {
    (1..=count).map(|i| backend.placeholder(i)).collect()
}

/// Build the idempotent CREATE TABLE for `stats`.
pub fn build_create_table(backend: Backend) -> String {
    let mut defs = vec![backend.identity_column().to_string()];
    defs.extend(
        Column::SUPERSET
            .iter()
            .map(|c| format!("{} {}", c.as_str(), c.sql_type())),
    );

    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
        STATS_TABLE,
        defs.join(",\n    ")
    )
}

/// Build the INSERT for one record, covering only its present columns.
pub fn build_stats_insert(backend: Backend, record: &StatsRecord) -> InsertStatement {
    let (columns, values): (Vec<Column>, Vec<SqlValue>) = record.bindings().into_iter().unzip();
    let col_names: Vec<&str> = columns.iter().map(|c| c.as_str()).collect();

    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        STATS_TABLE,
        col_names.join(", "),
        placeholders(backend, values.len()).join(", ")
    );

    InsertStatement { sql, columns, values }
}
