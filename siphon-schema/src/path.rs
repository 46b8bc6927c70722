//! Column paths and the flat naming rule.

use std::fmt;

/// Separator between path segments in a flat column name.
pub const SEPARATOR: &str = "_";

/// Field names from the root type down to a column.
///
/// The flat column name is the segments joined with [`SEPARATOR`]; column
/// derivation and record flattening both build names through this type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ColumnPath {
    segments: Vec<String>,
}

impl ColumnPath {
    /// The empty path at the root type.
    pub fn root() -> Self {
        Self::default()
    }

    /// A path from explicit segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// The path one field further down.
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// The flat column name, e.g. `continent_code`.
    pub fn flat_name(&self) -> String {
        self.segments.join(SEPARATOR)
    }
}

/// Dotted form for messages, e.g. `continent.code`.
impl fmt::Display for ColumnPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}
