//! SQL text for the materialized table.
//!
//! Identifiers are always double-quoted, so GraphQL field names that happen
//! to be SQL keywords (`order`, `group`, ...) are valid column names.

use siphon_schema::Columns;

/// Quote an identifier for SQLite.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Table name for a root GraphQL type: the type name lowercased.
pub fn table_name(type_name: &str) -> String {
    type_name.to_lowercase()
}

/// `CREATE TABLE IF NOT EXISTS` for `table` with one TEXT column per
/// derived column, in column order.
pub fn create_table_sql(table: &str, columns: &Columns) -> String {
    let definitions: Vec<String> = columns
        .iter()
        .map(|column| {
            format!(
                "    {} {}",
                quote_ident(column.name()),
                column.sql_type().as_str()
            )
        })
        .collect();

    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n{}\n)",
        quote_ident(table),
        definitions.join(",\n")
    )
}

/// Parameterized `INSERT` with one numbered placeholder per column.
pub fn insert_sql(table: &str, columns: &Columns) -> String {
    let names: Vec<String> = columns.names().map(quote_ident).collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();

    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_ident(table),
        names.join(", "),
        placeholders.join(", ")
    )
}

pub fn count_sql(table: &str) -> String {
    format!("SELECT COUNT(*) FROM {}", quote_ident(table))
}

/// The first `limit` rows in insertion order.
pub fn sample_sql(table: &str) -> String {
    format!("SELECT * FROM {} ORDER BY rowid LIMIT ?1", quote_ident(table))
}
