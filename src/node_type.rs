//! The external-facing contract this crate consumes from a schema.
//!
//! The content-matching engine never constructs or owns node types or
//! document fragments itself — it only reads through these two traits.
//! A calling crate (the document model) implements them over whatever
//! representation it already uses for node types and trees.

use std::hash::Hash;

use crate::dfa::Match;

/// A schema's node type, as seen by the content-expression engine.
///
/// Implementors are expected to be cheap to clone (an interned symbol, a
/// small integer id, or an `Rc` handle) since the engine stores `Self` by
/// value on every NFA/DFA edge and inside `fill_before`'s synthesized
/// sequence.
pub trait NodeType: Clone + Eq + Hash {
    /// The concrete node representation this node type constructs.
    type Node;

    /// Name unique within the schema.
    fn name(&self) -> &str;

    /// Group tags this node type belongs to, in no particular order
    /// relative to other node types (order only matters for resolving a
    /// group identifier across *all* node types in a schema, which the
    /// resolver does by iterating the schema's node type table).
    fn groups(&self) -> &[String];

    /// True for the schema's designated text node type.
    fn is_text(&self) -> bool;

    /// True for node types that cannot have content (no content match
    /// applies to them at all).
    fn is_leaf(&self) -> bool;

    /// True for node types that render inline rather than as a block.
    fn is_inline(&self) -> bool;

    /// True iff some attribute of this node type has no default value,
    /// meaning `create_and_fill` cannot synthesize an instance.
    fn has_required_attrs(&self) -> bool;

    /// This node type's own content-match DFA root, compiled from its own
    /// content expression. Used transitively by `find_wrapping` to walk
    /// through candidate wrapper types.
    fn content_match(&self) -> Match<Self>
    where
        Self: Sized;

    /// Construct a default instance of this node type with whatever
    /// minimal content its own expression requires, or `None` if that is
    /// not possible (required attributes, or no synthesizable content).
    fn create_and_fill(&self) -> Option<Self::Node>;
}

/// An opaque, already-materialized child sequence.
///
/// The engine only ever needs the type of each child, never the child's
/// own content or attributes.
pub trait Fragment<T: NodeType> {
    /// Number of children.
    fn child_count(&self) -> usize;

    /// The type of the child at `index`.
    ///
    /// # Panics
    /// May panic if `index >= self.child_count()`.
    fn child_type(&self, index: usize) -> T;
}

impl<T: NodeType> Fragment<T> for [T] {
    fn child_count(&self) -> usize {
        self.len()
    }

    fn child_type(&self, index: usize) -> T {
        self[index].clone()
    }
}

impl<T: NodeType> Fragment<T> for Vec<T> {
    fn child_count(&self) -> usize {
        self.len()
    }

    fn child_type(&self, index: usize) -> T {
        self[index].clone()
    }
}
