//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from manifest validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the config file.
    pub config_path: PathBuf,
    /// GraphQL endpoint URL.
    pub endpoint: String,
    /// Where the database lives, e.g. a path or `$SIPHON_DATABASE`.
    pub database: String,
    /// Introspection dump path, if configured.
    pub dump: Option<PathBuf>,
    pub sources: Vec<SourceInfo>,
    /// Warning messages.
    pub warnings: Vec<String>,
}

/// One configured source.
#[derive(Debug)]
pub struct SourceInfo {
    pub name: String,
    pub type_name: String,
    pub table: String,
    pub field: String,
    pub max_depth: Option<usize>,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }
        if !self.warnings.is_empty() {
            out.newline();
        }

        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        out.newline();

        out.key_value_indented("endpoint", &self.endpoint);
        out.key_value_indented("database", &self.database);
        if let Some(dump) = &self.dump {
            out.key_value_indented("dump", &dump.display().to_string());
        }
        out.newline();

        let count = self.sources.len();
        out.section(&format!(
            "{} source{}",
            count,
            if count == 1 { "" } else { "s" }
        ));
        for source in &self.sources {
            let mut line = format!(
                "{}: {} → table '{}' (field '{}'",
                source.name, source.type_name, source.table, source.field
            );
            if let Some(depth) = source.max_depth {
                line.push_str(&format!(", max depth {}", depth));
            }
            line.push(')');
            out.list_item(&line);
        }
    }
}
