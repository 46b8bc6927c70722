//! Validation context and span lookup for siphon.toml.

use std::sync::Arc;

use miette::SourceSpan;

use crate::{Result, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "siphon.toml");
/// ctx.validate_name("countries", "source")?;
///
/// let source = ctx.push("countries");
/// let span = source.key_span("query");
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// Source context for error reporting (shared across nested contexts)
    source: Arc<SourceContext>,
    /// Table path, e.g. ["sources", "countries"]
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    pub fn src(&self) -> &str {
        self.source.src()
    }

    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a table segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut path = self.path.clone();
        path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path,
        }
    }

    /// The current table path joined with dots.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Span of the current table's header, e.g. `[sources.countries]`.
    pub fn table_span(&self) -> Option<SourceSpan> {
        find_table_span(self.src(), &self.path_string())
    }

    /// Span of `key` inside the current table.
    pub fn key_span(&self, key: &str) -> Option<SourceSpan> {
        let start = self.table_span().map_or(0, |span| span.offset());
        find_key_span(self.src(), start, key).or_else(|| self.table_span())
    }

    /// Create a validation error.
    pub fn error(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
        help: Option<&str>,
    ) -> Box<crate::Error> {
        self.source
            .validation_error(message, span, help.map(String::from))
    }

    /// Validate that a name is a usable identifier.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        match validate_identifier(name) {
            Some(reason) => Err(self.source.invalid_identifier_error(
                name,
                kind,
                reason,
                find_name_span(self.src(), name),
            )),
            None => Ok(()),
        }
    }
}

/// Find the span of a table header such as `[sources.countries]`.
pub(crate) fn find_table_span(src: &str, path: &str) -> Option<SourceSpan> {
    let header = format!("[{}]", path);
    src.find(&header)
        .map(|pos| SourceSpan::from((pos, header.len())))
}

/// Find the span of a name in the TOML source
/// Searches for patterns like `.name]`, `.name.`, or `.name =`
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    let patterns = [
        format!(".{}]", name), // [sources.name]
        format!(".{}.", name), // [sources.name.something]
        format!(".{} ", name), // inline: name = { ... }
        format!(".{}=", name), // inline without space: name={ ... }
    ];

    for pattern in &patterns {
        if let Some(pos) = src.find(pattern) {
            // +1 to skip the leading dot
            return Some(SourceSpan::from((pos + 1, name.len())));
        }
    }

    src.find(name)
        .map(|pos| SourceSpan::from((pos, name.len())))
}

/// Find `key = ...` at the start of a line, scanning from byte `from` until
/// the next table header.
pub(crate) fn find_key_span(src: &str, from: usize, key: &str) -> Option<SourceSpan> {
    let mut offset = from;
    let rest = src.get(from..)?;

    for (i, line) in rest.split_inclusive('\n').enumerate() {
        let trimmed = line.trim_start();
        if i > 0 && trimmed.starts_with('[') {
            return None;
        }
        if let Some(after) = trimmed.strip_prefix(key)
            && after.trim_start().starts_with('=')
        {
            let start = offset + (line.len() - trimmed.len());
            return Some(SourceSpan::from((start, key.len())));
        }
        offset += line.len();
    }
    None
}

/// Validate that a name is an identifier (letters, digits, underscores and
/// dashes, starting with a letter or underscore).
/// Returns None if valid, Some(reason) if invalid
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    if chars.any(|c| !(c.is_ascii_alphanumeric() || c == '_' || c == '-')) {
        return Some("name must contain only letters, numbers, underscores, and dashes");
    }

    None
}
