use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("type '{name}' not found in introspection data")]
    #[diagnostic(
        code(siphon::type_not_found),
        help("GraphQL type names are case-sensitive, e.g. 'Country' rather than 'country'")
    )]
    TypeNotFound { name: String },

    #[error("no columns derived for type '{type_name}'")]
    #[diagnostic(
        code(siphon::no_columns),
        help(
            "the type has no scalar or enum fields outside of lists of objects, unions and interfaces"
        )
    )]
    NoColumnsDerived { type_name: String },

    #[error("failed to read '{path}'")]
    #[diagnostic(help("run 'siphon introspect --output <file>' to write an introspection dump"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed introspection document")]
    #[diagnostic(code(siphon::malformed_introspection))]
    MalformedIntrospection(#[source] serde_json::Error),

    #[error("introspection document has no '__schema' entry")]
    #[diagnostic(
        code(siphon::missing_schema),
        help("expected a document shaped like {{ \"data\": {{ \"__schema\": {{ \"types\": [...] }} }} }}")
    )]
    MissingSchema,

    #[error("record is not a JSON object (found {found})")]
    #[diagnostic(code(siphon::not_an_object))]
    NotAnObject { found: &'static str },
}
