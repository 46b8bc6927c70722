//! siphon.toml parsing and validation.
//!
//! The manifest names the GraphQL endpoint, the SQLite database and the
//! sources to load. Parse and validation errors are [`miette`] diagnostics
//! that point into the file.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod database;
mod endpoint;
mod error;
mod file;
mod manifest;
mod source;
mod template;
mod validate;

pub use database::{DatabaseConfig, SqliteConfig};
pub use endpoint::EndpointConfig;
pub use error::{Error, Result, SourceContext};
pub use file::SiphonToml;
pub use manifest::{IntrospectionConfig, Manifest, parse_manifest};
pub use source::{Source, SourceConfig};
pub use template::starter_manifest;
pub use validate::ParseContext;

/// Default manifest file name.
pub const MANIFEST_FILE: &str = "siphon.toml";
