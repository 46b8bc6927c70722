//! Columns operation - derive a type's table layout.

use eyre::{Context, Result};
use siphon_schema::{Deriver, Schema};
use siphon_store::sql;

use crate::reports::ColumnsReport;

/// Execute the columns operation.
///
/// With `ddl`, the report carries the CREATE TABLE statement instead of the
/// column listing.
pub fn columns(
    schema: &Schema,
    type_name: &str,
    max_depth: Option<usize>,
    ddl: bool,
) -> Result<ColumnsReport> {
    let derivation = Deriver::new(schema)
        .max_depth(max_depth)
        .derive(type_name)
        .wrap_err_with(|| format!("cannot derive columns for '{}'", type_name))?;
    let table = sql::table_name(type_name);

    Ok(ColumnsReport {
        type_name: derivation.type_name.clone(),
        ddl: ddl.then(|| sql::create_table_sql(&table, &derivation.columns)),
        table,
        columns: derivation
            .columns
            .iter()
            .map(|column| (column.name().to_string(), column.sql_type().as_str().to_string()))
            .collect(),
        skipped: derivation.skipped.iter().map(ToString::to_string).collect(),
    })
}
