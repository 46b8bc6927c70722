//! Shared recursive descent over nested shapes.
//!
//! Column derivation walks the type graph and record flattening walks JSON
//! values. Both are expressed as a [`Shape`] driven by the single [`walk`]
//! function, so child paths are built exactly one way for both.

use crate::{ColumnPath, SkipReason};

/// How one field of a shape takes part in the flat namespace.
pub enum Step<L, S> {
    /// The field becomes a single column.
    Leaf(L),
    /// The field is a nested shape whose fields are prefixed by this one.
    Object(S),
    /// The field is left out.
    Skip(SkipReason),
}

/// Something with ordered, named fields that can be walked.
pub trait Shape<'a>: Sized {
    /// What a leaf field carries.
    type Leaf;

    /// The fields of this shape, in order, each classified.
    fn steps(&self) -> Vec<(&'a str, Step<Self::Leaf, Self>)>;
}

/// Receives the leaves and skips found by [`walk`].
pub trait Visitor<L> {
    fn leaf(&mut self, path: &ColumnPath, leaf: L);

    fn skip(&mut self, path: &ColumnPath, reason: SkipReason) {
        let _ = (path, reason);
    }
}

/// Visit every field of `shape` depth-first, in declaration order.
///
/// Nested shapes are expanded in place of the field that holds them.
pub fn walk<'a, S, V>(shape: &S, path: &ColumnPath, visitor: &mut V)
where
    S: Shape<'a>,
    V: Visitor<S::Leaf>,
{
    for (name, step) in shape.steps() {
        let child = path.child(name);
        match step {
            Step::Leaf(leaf) => visitor.leaf(&child, leaf),
            Step::Object(nested) => walk(&nested, &child, visitor),
            Step::Skip(reason) => visitor.skip(&child, reason),
        }
    }
}
