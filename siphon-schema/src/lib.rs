//! Schema inference and record flattening for siphon.
//!
//! This crate turns an introspected GraphQL type graph into a flat list of
//! table columns, and nested JSON records into flat rows keyed by the same
//! column names.
//!
//! # Architecture
//!
//! ```text
//! introspection JSON → Schema → Deriver (Columns)
//!                                  │
//! data record (JSON) → flatten ────┴→ FlatRecord projected onto Columns
//! ```
//!
//! Both the [`Deriver`] and [`flatten`] run on the same recursive walker
//! (see [`walk`]), so a flattened record's keys are always named the way the
//! derived columns are.
//!
//! # Modules
//!
//! - [`introspection`] - GraphQL introspection types and parsing
//! - [`resolve`] - unwrapping of NON_NULL/LIST type modifiers
//! - [`columns`] - column derivation for a root type
//! - [`flatten`] - record flattening
//! - [`testing`] - schema fixtures (feature-gated)

pub mod columns;
mod diagnostic;
mod error;
pub mod flatten;
pub mod introspection;
mod path;
pub mod resolve;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod walk;

pub use columns::{ColumnSpec, Columns, Derivation, Deriver, SqlType, derive_columns};
pub use diagnostic::{SkipReason, Skipped};
pub use error::{Error, Result};
pub use flatten::{
    FlatRecord, FlatValue, LIST_DELIMITER, decode_list, encode_list, flatten, flatten_value,
};
pub use introspection::{
    Field, INTROSPECTION_QUERY, Schema, TypeDefinition, TypeKind, TypeRef,
};
pub use path::{ColumnPath, SEPARATOR};
pub use resolve::unwrap;
