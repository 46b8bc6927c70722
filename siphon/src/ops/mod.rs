//! Core operations.
//!
//! This module contains the business logic for siphon commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod columns;
pub mod introspect;
pub mod load;
pub mod preview;

pub use check::check;
pub use columns::columns;
pub use introspect::introspect;
pub use load::load;
pub use preview::preview;

use eyre::{Context, Result};
use siphon_client::GraphQlClient;
use siphon_manifest::EndpointConfig;

/// Build the HTTP client for the `[endpoint]` table.
pub fn connect(endpoint: &EndpointConfig) -> Result<GraphQlClient> {
    let mut builder = GraphQlClient::builder(&endpoint.url)
        .timeout(endpoint.timeout())
        .user_agent(endpoint.user_agent.clone());
    for (name, value) in &endpoint.headers {
        builder = builder.header(name, value);
    }
    builder
        .build()
        .wrap_err_with(|| format!("failed to set up client for {}", endpoint.url))
}
