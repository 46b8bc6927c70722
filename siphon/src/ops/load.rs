//! Load operation - the full pipeline for one source.

use eyre::{Context, Result};
use siphon_client::Endpoint;
use siphon_manifest::Source;
use siphon_schema::{Deriver, Schema};
use siphon_store::Store;

use crate::reports::LoadReport;

/// Execute the load operation for `source`.
///
/// Derives the source type's columns, creates its table, fetches the
/// records and inserts them in one transaction. Schema and fetch errors
/// abort; a record that fails to insert is counted and reported.
pub fn load(
    endpoint: &dyn Endpoint,
    schema: &Schema,
    store: &mut Store,
    source: Source<'_>,
) -> Result<LoadReport> {
    let derivation = Deriver::new(schema)
        .max_depth(source.max_depth())
        .derive(source.type_name())
        .wrap_err_with(|| format!("source '{}': cannot derive columns", source.name))?;
    for skipped in &derivation.skipped {
        tracing::debug!(source = source.name, %skipped, "field has no column");
    }

    let table = store
        .create_table(source.type_name(), &derivation.columns)
        .wrap_err_with(|| format!("source '{}': cannot create table", source.name))?;

    let records = endpoint
        .fetch_records(source.query(), source.field())
        .wrap_err_with(|| format!("source '{}': failed to fetch records", source.name))?;

    let summary = store
        .load(&table, &records)
        .wrap_err_with(|| format!("source '{}': load aborted", source.name))?;
    let rows = store.count_rows(table.name())?;

    Ok(LoadReport {
        source: source.name.to_string(),
        table: table.name().to_string(),
        columns: derivation.columns.len(),
        skipped: derivation.skipped.len(),
        attempted: summary.attempted,
        inserted: summary.inserted,
        failures: summary.failures.iter().map(ToString::to_string).collect(),
        dropped: summary.dropped,
        rows,
    })
}
