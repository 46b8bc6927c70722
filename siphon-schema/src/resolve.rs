//! Type reference resolution.

use crate::{TypeKind, TypeRef};

/// Strip NON_NULL and LIST modifiers down to the named type.
///
/// Returns `None` when a modifier has no `ofType` or the innermost reference
/// carries no name. Callers skip such fields rather than failing.
pub fn unwrap(type_ref: &TypeRef) -> Option<&TypeRef> {
    let mut current = type_ref;
    while current.kind.is_wrapper() {
        current = current.of_type.as_deref()?;
    }
    current.name.as_ref().map(|_| current)
}

impl TypeRef {
    /// The named type behind any modifiers, as `(kind, name)`.
    pub fn named_type(&self) -> Option<(TypeKind, &str)> {
        let inner = unwrap(self)?;
        inner.name.as_deref().map(|name| (inner.kind, name))
    }

    /// Returns true if a LIST modifier appears anywhere in the chain.
    pub fn is_list(&self) -> bool {
        let mut current = Some(self);
        while let Some(ty) = current {
            if ty.kind == TypeKind::List {
                return true;
            }
            current = ty.of_type.as_deref();
        }
        false
    }
}
