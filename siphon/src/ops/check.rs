//! Check operation - manifest validation.

use siphon_manifest::SiphonToml;
use siphon_store::sql;

use crate::reports::{CheckReport, SourceInfo};

/// Execute the check operation.
///
/// Parsing already validated the manifest; this collects what it configures
/// and warns about things that only fail at run time.
pub fn check(file: &SiphonToml) -> CheckReport {
    let manifest = file.manifest();
    let mut warnings = Vec::new();

    let sqlite = manifest.sqlite();
    let database = match (&sqlite.path, &sqlite.env) {
        (Some(path), _) => file.resolve(path).display().to_string(),
        (None, Some(var)) => {
            if std::env::var_os(var).is_none() {
                warnings.push(format!(
                    "environment variable '{}' is not set; 'load' will fail",
                    var
                ));
            }
            format!("${}", var)
        }
        (None, None) => String::from("(unset)"),
    };

    if manifest.sources.is_empty() {
        warnings.push(String::from(
            "no sources defined; add a [sources.<name>] table to load data",
        ));
    }

    let sources = manifest
        .sources()
        .map(|source| SourceInfo {
            name: source.name.to_string(),
            type_name: source.type_name().to_string(),
            table: sql::table_name(source.type_name()),
            field: source.field().to_string(),
            max_depth: source.max_depth(),
        })
        .collect();

    CheckReport {
        config_path: file.path().to_path_buf(),
        endpoint: manifest.endpoint.url.clone(),
        database,
        dump: file.dump_path(),
        sources,
        warnings,
    }
}
