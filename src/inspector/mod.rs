//! Depth-first traversal capabilities.
//!
//! Two capability levels exist:
//!
//! - [`StackTraversal`]: the single primitive, entry/exit events with the
//!   ancestor stack and visitor-controlled pruning.
//! - [`Traversal`]: the full surface, adding callback-only preorder and
//!   entry/exit events without a stack.
//!
//! The engine ([`Inspector`]) implements both natively. The filters in
//! [`crate::filter`] wrap either level and implement the full surface, so a
//! downstream check can take `&dyn Traversal` without knowing whether it sees
//! every file or only production ones.
//!
//! Type sets are slices of [`NodeKind`]; an empty slice matches every kind.

mod tree;

use std::borrow::Cow;

use crate::ast::{Node, NodeKind};

pub use tree::Inspector;

/// What the visitor wants after an entry event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Visit the children, then deliver the exit event.
    Descend,
    /// Skip the children and the exit event.
    Prune,
}

/// Entry/exit visitor receiving the ancestor stack (root first, current node last).
pub type StackVisitor<'v, 'a> = dyn FnMut(&'a Node, bool, &[&'a Node]) -> Visit + 'v;

/// Entry/exit visitor.
pub type NodeVisitor<'v, 'a> = dyn FnMut(&'a Node, bool) -> Visit + 'v;

/// Preorder visitor.
pub type PreorderVisitor<'v, 'a> = dyn FnMut(&'a Node) + 'v;

/// Minimal traversal capability.
pub trait StackTraversal<'a> {
    /// Walk matching nodes with entry (`push == true`) and exit events.
    ///
    /// Returning [`Visit::Prune`] from an entry event skips the node's
    /// children and its exit event. The value returned from exit events is
    /// ignored.
    fn with_stack(&self, types: &[NodeKind], f: &mut StackVisitor<'_, 'a>);
}

/// Full traversal capability.
pub trait Traversal<'a>: StackTraversal<'a> {
    /// Visit every matching node once, parent before children.
    fn preorder(&self, types: &[NodeKind], f: &mut PreorderVisitor<'_, 'a>);

    /// Like [`StackTraversal::with_stack`] without the stack.
    fn nodes(&self, types: &[NodeKind], f: &mut NodeVisitor<'_, 'a>);
}

impl<'a, T: StackTraversal<'a> + ?Sized> StackTraversal<'a> for &T {
    fn with_stack(&self, types: &[NodeKind], f: &mut StackVisitor<'_, 'a>) {
        (**self).with_stack(types, f)
    }
}

impl<'a, T: Traversal<'a> + ?Sized> Traversal<'a> for &T {
    fn preorder(&self, types: &[NodeKind], f: &mut PreorderVisitor<'_, 'a>) {
        (**self).preorder(types, f)
    }

    fn nodes(&self, types: &[NodeKind], f: &mut NodeVisitor<'_, 'a>) {
        (**self).nodes(types, f)
    }
}

/// Whether a type set selects `kind`. The empty set selects everything.
pub fn matches(types: &[NodeKind], kind: NodeKind) -> bool {
    types.is_empty() || types.contains(&kind)
}

/// Extend a type set with `kind`.
///
/// The empty set already selects every kind and is returned unchanged, as is
/// a set that lists `kind`.
pub fn with_kind(types: &[NodeKind], kind: NodeKind) -> Cow<'_, [NodeKind]> {
    if matches(types, kind) {
        return Cow::Borrowed(types);
    }
    let mut extended = Vec::with_capacity(types.len() + 1);
    extended.extend_from_slice(types);
    extended.push(kind);
    Cow::Owned(extended)
}
