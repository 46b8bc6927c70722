//! Skipped-field diagnostics.
//!
//! Column derivation never fails on a single unusable field; it records why
//! the field produced no column and moves on.

use std::fmt;

use crate::{ColumnPath, TypeKind};

/// Why a field produced no column (or, when flattening, no value).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The type reference never reaches a named type.
    Unresolvable,
    /// The named type is a kind that has no column mapping.
    UnsupportedKind(TypeKind),
    /// A nested object type is missing from the introspection data.
    TypeNotFound(String),
    /// The object type already appears on the current path.
    Cycle(String),
    /// Expanding the object would exceed the configured nesting depth.
    DepthLimit(usize),
    /// Another field already produced this flat column name.
    DuplicateColumn,
    /// A list value contains objects.
    ObjectList,
    /// A list value has no elements.
    EmptyList,
    /// A null value.
    Null,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Unresolvable => write!(f, "type does not resolve to a named type"),
            SkipReason::UnsupportedKind(kind) => write!(f, "unsupported kind {}", kind),
            SkipReason::TypeNotFound(name) => write!(f, "type '{}' not found", name),
            SkipReason::Cycle(name) => write!(f, "type '{}' refers back to itself", name),
            SkipReason::DepthLimit(depth) => write!(f, "nesting deeper than {}", depth),
            SkipReason::DuplicateColumn => write!(f, "duplicate column name"),
            SkipReason::ObjectList => write!(f, "list of objects"),
            SkipReason::EmptyList => write!(f, "empty list"),
            SkipReason::Null => write!(f, "null"),
        }
    }
}

/// A field that was skipped, with its path and reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub path: ColumnPath,
    pub reason: SkipReason,
}

impl Skipped {
    pub fn new(path: ColumnPath, reason: SkipReason) -> Self {
        Self { path, reason }
    }
}

impl fmt::Display for Skipped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}
