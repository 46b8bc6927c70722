//! GraphQL transport for siphon.
//!
//! Every request is a blocking `POST` of `{"query": ...}`. Responses are
//! checked the same way for both kinds of request: the HTTP status must be
//! 200, the body must be JSON, and a GraphQL `errors` array without `data`
//! is a failure.

mod client;
mod error;
mod response;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use client::{ClientBuilder, Endpoint, GraphQlClient};
pub use error::{Error, Result};
pub use response::{RequestKind, decode_response, records_at};
