//! Preview operation - read back a source's table.

use eyre::{Context, Result};
use siphon_manifest::Source;
use siphon_store::{Store, sql};

use crate::reports::PreviewReport;

/// Execute the preview operation.
pub fn preview(store: &Store, source: Source<'_>, limit: usize) -> Result<PreviewReport> {
    let table = sql::table_name(source.type_name());
    if !store.table_exists(&table)? {
        eyre::bail!(
            "table '{}' does not exist yet; run 'siphon load {}' first",
            table,
            source.name
        );
    }

    let row_count = store.count_rows(&table)?;
    let sample = store
        .sample_rows(&table, limit)
        .wrap_err_with(|| format!("failed to read table '{}'", table))?;

    Ok(PreviewReport {
        source: source.name.to_string(),
        table,
        row_count,
        columns: sample.columns,
        rows: sample
            .rows
            .iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect(),
    })
}
