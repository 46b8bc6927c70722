//! Load command report data structures.

use super::output::{Output, Report};

/// Failures listed before the rest are summarized.
const MAX_LISTED_FAILURES: usize = 10;

/// Report data from loading one source.
#[derive(Debug)]
pub struct LoadReport {
    pub source: String,
    pub table: String,
    /// Derived column count.
    pub columns: usize,
    /// Fields that produced no column.
    pub skipped: usize,
    pub attempted: usize,
    pub inserted: usize,
    /// One message per record that was not inserted.
    pub failures: Vec<String>,
    /// Record fields that had no column and were not stored.
    pub dropped: Vec<String>,
    /// Rows in the table after the load.
    pub rows: usize,
}

impl Report for LoadReport {
    fn render(&self, out: &mut dyn Output) {
        out.divider(&self.source);

        let mut table = format!("{} ({} columns", self.table, self.columns);
        if self.skipped > 0 {
            table.push_str(&format!(", {} fields skipped", self.skipped));
        }
        table.push(')');
        out.key_value_indented("table", &table);
        out.key_value_indented("attempted", &self.attempted.to_string());
        out.key_value_indented("inserted", &self.inserted.to_string());
        if !self.failures.is_empty() {
            out.key_value_indented("failed", &self.failures.len().to_string());
        }
        out.key_value_indented("rows", &self.rows.to_string());

        for failure in self.failures.iter().take(MAX_LISTED_FAILURES) {
            out.warning(failure);
        }
        if self.failures.len() > MAX_LISTED_FAILURES {
            out.warning(&format!(
                "... and {} more failed records",
                self.failures.len() - MAX_LISTED_FAILURES
            ));
        }
        if !self.dropped.is_empty() {
            out.warning(&format!(
                "fields without a column were not stored: {}",
                self.dropped.join(", ")
            ));
        }
        out.newline();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::BufferOutput;

    fn report(failures: usize) -> LoadReport {
        LoadReport {
            source: "countries".into(),
            table: "country".into(),
            columns: 9,
            skipped: 3,
            attempted: 250,
            inserted: 250 - failures,
            failures: (0..failures)
                .map(|i| format!("record {}: record is not a JSON object (found null)", i))
                .collect(),
            dropped: Vec::new(),
            rows: 500 - failures,
        }
    }

    #[test]
    fn test_render_clean_load() {
        let mut out = BufferOutput::default();
        report(0).render(&mut out);
        assert_eq!(
            out.text,
            "── countries ──\n\
             \x20 table      country (9 columns, 3 fields skipped)\n\
             \x20 attempted  250\n\
             \x20 inserted   250\n\
             \x20 rows       500\n\
             \n"
        );
    }

    #[test]
    fn test_render_caps_listed_failures() {
        let mut out = BufferOutput::default();
        report(12).render(&mut out);

        assert!(out.text.contains("  failed     12\n"));
        assert_eq!(out.text.matches("warning: record").count(), 10);
        assert!(out.text.contains("warning: ... and 2 more failed records\n"));
    }

    #[test]
    fn test_render_dropped_fields() {
        let mut report = report(0);
        report.dropped = vec!["manager_name".into(), "manager_manager_name".into()];

        let mut out = BufferOutput::default();
        report.render(&mut out);
        assert!(out.text.ends_with(
            "warning: fields without a column were not stored: manager_name, manager_manager_name\n\n"
        ));
    }
}
