//! The siphon.toml manifest: parsing and validation.

use std::{path::PathBuf, str::FromStr};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{
    DatabaseConfig, EndpointConfig, Error, Result, Source, SourceConfig, SqliteConfig,
    error::SourceContext, validate::ParseContext,
};

/// Root manifest for siphon.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub endpoint: EndpointConfig,

    pub database: DatabaseConfig,

    #[serde(default)]
    pub introspection: IntrospectionConfig,

    /// Sources in declaration order
    #[serde(default)]
    pub sources: IndexMap<String, SourceConfig>,
}

/// The `[introspection]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntrospectionConfig {
    /// Where to write the raw introspection document
    pub dump: Option<PathBuf>,
}

impl Manifest {
    pub fn sources(&self) -> impl Iterator<Item = Source<'_>> {
        self.sources.iter().map(|(name, config)| Source { name, config })
    }

    /// Look up a source by name.
    pub fn source(&self, name: &str) -> Result<Source<'_>> {
        match self.sources.get_key_value(name) {
            Some((name, config)) => Ok(Source { name, config }),
            None => Err(Box::new(Error::UnknownSource {
                name: name.to_string(),
                available: self.source_names(),
            })),
        }
    }

    fn source_names(&self) -> String {
        if self.sources.is_empty() {
            "(none)".to_string()
        } else {
            self.sources
                .keys()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        }
    }

    pub fn sqlite(&self) -> &SqliteConfig {
        match &self.database {
            DatabaseConfig::Sqlite(config) => config,
        }
    }

    /// Parse a siphon.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "siphon.toml")
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&manifest, &ParseContext::new(content, filename))?;
    Ok(manifest)
}

fn validate_manifest<'a>(manifest: &'a Manifest, ctx: &ParseContext<'a>) -> Result<()> {
    let endpoint = ctx.push("endpoint");
    if !manifest.endpoint.has_http_scheme() {
        return Err(endpoint.error(
            "endpoint url must start with http:// or https://",
            endpoint.key_span("url"),
            Some("e.g. url = \"https://countries.trevorblades.com/\""),
        ));
    }

    let database = ctx.push("database");
    let sqlite = manifest.sqlite();
    if sqlite.path.is_none() && sqlite.env.is_none() {
        return Err(database.error(
            "database needs a 'path' or an 'env'",
            database.table_span(),
            Some("add path = \"siphon.db\" or env = \"SIPHON_DATABASE\""),
        ));
    }

    let sources = ctx.push("sources");
    for (name, config) in &manifest.sources {
        sources.validate_name(name, "source")?;
        validate_source(&sources.push(name), config)?;
    }

    Ok(())
}

fn validate_source(ctx: &ParseContext<'_>, config: &SourceConfig) -> Result<()> {
    if config.type_name.trim().is_empty() {
        return Err(ctx.error(
            "source type cannot be empty",
            ctx.key_span("type"),
            Some("set type to the GraphQL type of each record, e.g. \"Country\""),
        ));
    }

    if config.query.trim().is_empty() {
        return Err(ctx.error("source query cannot be empty", ctx.key_span("query"), None));
    }

    if let Some(field) = &config.field
        && field.trim().is_empty()
    {
        return Err(ctx.error(
            "source field cannot be empty",
            ctx.key_span("field"),
            Some("remove 'field' to use the source name"),
        ));
    }

    if config.max_depth == Some(0) {
        return Err(ctx.error(
            "max_depth must be at least 1",
            ctx.key_span("max_depth"),
            Some("remove max_depth to expand nested objects without a limit"),
        ));
    }

    Ok(())
}
