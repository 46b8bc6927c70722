use serde::Deserialize;

/// One `[sources.<name>]` table: a root type and the query that lists its
/// records.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Root GraphQL type of each record
    #[serde(rename = "type")]
    pub type_name: String,

    /// Root field of the data response holding the records (defaults to the
    /// source name)
    pub field: Option<String>,

    /// Object levels below the root to expand into columns
    pub max_depth: Option<usize>,

    /// GraphQL query document
    pub query: String,
}

/// A source together with its name.
#[derive(Debug, Clone, Copy)]
pub struct Source<'a> {
    pub name: &'a str,
    pub config: &'a SourceConfig,
}

impl<'a> Source<'a> {
    pub fn type_name(&self) -> &'a str {
        &self.config.type_name
    }

    /// The response field that holds the records.
    pub fn field(&self) -> &'a str {
        self.config.field.as_deref().unwrap_or(self.name)
    }

    pub fn query(&self) -> &'a str {
        &self.config.query
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.config.max_depth
    }
}
