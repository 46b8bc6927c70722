//! Introspect command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from fetching introspection.
#[derive(Debug)]
pub struct IntrospectReport {
    /// Endpoint that was introspected.
    pub url: String,
    /// Number of types, introspection types excluded.
    pub types: usize,
    /// Type count per kind, by kind name.
    pub kinds: Vec<(String, usize)>,
    /// Object types that can be loaded as a source.
    pub objects: Vec<String>,
    /// Where the raw document was written.
    pub dump: Option<PathBuf>,
}

impl Report for IntrospectReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!("Introspected {}: {} types", self.url, self.types));
        for (kind, count) in &self.kinds {
            out.key_value_indented(kind, &count.to_string());
        }
        out.newline();

        if !self.objects.is_empty() {
            out.section("Object types");
            for name in &self.objects {
                out.list_item(name);
            }
            out.newline();
        }

        if let Some(dump) = &self.dump {
            out.preformatted(&format!("Wrote {}", dump.display()));
        }
    }
}
