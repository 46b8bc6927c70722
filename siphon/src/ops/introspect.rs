//! Introspect operation - fetch and summarize the endpoint's schema.

use std::{collections::BTreeMap, path::Path};

use eyre::{Context, Result};
use siphon_client::Endpoint;
use siphon_schema::Schema;

use crate::{files::File, reports::IntrospectReport};

/// Execute the introspect operation.
///
/// Fetches the introspection document, parses it and, when `dump` is given,
/// writes the raw document there pretty-printed.
pub fn introspect(
    endpoint: &dyn Endpoint,
    url: &str,
    dump: Option<&Path>,
) -> Result<(Schema, IntrospectReport)> {
    let document = endpoint
        .introspect()
        .wrap_err_with(|| format!("failed to introspect {}", url))?;
    let schema = Schema::from_response(&document)
        .wrap_err_with(|| format!("{} returned an unusable introspection document", url))?;

    if let Some(path) = dump {
        let content = serde_json::to_string_pretty(&document)
            .wrap_err("failed to serialize introspection document")?;
        File::new(path, content + "\n").write()?;
        tracing::info!(path = %path.display(), "wrote introspection dump");
    }

    let report = summarize(&schema, url, dump);
    Ok((schema, report))
}

fn summarize(schema: &Schema, url: &str, dump: Option<&Path>) -> IntrospectReport {
    let mut kinds: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut types = 0;
    for definition in schema.types().filter(|def| !def.is_introspection_type()) {
        *kinds.entry(definition.kind.as_str()).or_default() += 1;
        types += 1;
    }

    IntrospectReport {
        url: url.to_string(),
        types,
        kinds: kinds
            .into_iter()
            .map(|(kind, count)| (kind.to_string(), count))
            .collect(),
        objects: schema.object_types().map(|def| def.name.clone()).collect(),
        dump: dump.map(Path::to_path_buf),
    }
}
