//! Columns command report data structures.

use super::output::{Output, Report};

/// Report data from deriving the columns of one type.
#[derive(Debug)]
pub struct ColumnsReport {
    pub type_name: String,
    pub table: String,
    /// Column name and SQL type, in table order.
    pub columns: Vec<(String, String)>,
    /// Skipped fields as `path: reason`.
    pub skipped: Vec<String>,
    /// CREATE TABLE statement, when requested.
    pub ddl: Option<String>,
}

impl Report for ColumnsReport {
    fn render(&self, out: &mut dyn Output) {
        if let Some(ddl) = &self.ddl {
            out.preformatted(&format!("{};", ddl));
            return;
        }

        let count = self.columns.len();
        out.section(&format!(
            "{} → table '{}' ({} column{})",
            self.type_name,
            self.table,
            count,
            if count == 1 { "" } else { "s" }
        ));
        let width = self
            .columns
            .iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0);
        for (name, sql_type) in &self.columns {
            out.preformatted(&format!("  {:<width$}  {}", name, sql_type, width = width));
        }

        if !self.skipped.is_empty() {
            out.newline();
            out.section("Skipped");
            for skipped in &self.skipped {
                out.list_item(skipped);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::BufferOutput;

    #[test]
    fn test_render_listing() {
        let report = ColumnsReport {
            type_name: "Country".into(),
            table: "country".into(),
            columns: vec![
                ("code".into(), "TEXT".into()),
                ("continent_name".into(), "TEXT".into()),
            ],
            skipped: vec!["languages: list of objects".into()],
            ddl: None,
        };

        let mut out = BufferOutput::default();
        report.render(&mut out);
        insta::assert_snapshot!(out.text);
    }

    #[test]
    fn test_render_ddl_only() {
        let report = ColumnsReport {
            type_name: "Country".into(),
            table: "country".into(),
            columns: vec![("code".into(), "TEXT".into())],
            skipped: vec!["languages: list of objects".into()],
            ddl: Some("CREATE TABLE IF NOT EXISTS \"country\" (\n    \"code\" TEXT\n)".into()),
        };

        let mut out = BufferOutput::default();
        report.render(&mut out);
        assert_eq!(
            out.text,
            "CREATE TABLE IF NOT EXISTS \"country\" (\n    \"code\" TEXT\n);\n"
        );
    }
}
