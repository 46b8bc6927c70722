use thiserror::Error;

use crate::RequestKind;

/// Result type for GraphQL requests.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("introspection request failed with HTTP status {status}")]
    IntrospectionFetch { status: u16 },

    #[error("data request failed with HTTP status {status}")]
    DataFetch { status: u16 },

    #[error("{kind} query returned errors: {}", .messages.join("; "))]
    GraphQl {
        kind: RequestKind,
        messages: Vec<String>,
    },

    #[error("{kind} response has no 'data'")]
    MissingData { kind: RequestKind },

    #[error("response data has no field '{field}'")]
    MissingField { field: String },

    #[error("response field '{field}' is not a list (found {found})")]
    NotAList { field: String, found: &'static str },

    #[error("{kind} response is not valid JSON")]
    Decode {
        kind: RequestKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("request to '{url}' failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid request header '{name}'")]
    InvalidHeader { name: String },

    #[error("failed to build HTTP client")]
    Build(#[source] reqwest::Error),
}
