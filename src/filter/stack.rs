//! Filter over an engine that offers only the stack-aware primitive.
//!
//! [`StackTraversal::with_stack`] is the one operation taken from the engine.
//! The filtered `with_stack` intercepts source-file events; `nodes` and
//! `preorder` are then built on the filtered `with_stack`, so the exclusion
//! logic lives in exactly one place.

use crate::ast::{Node, NodeKind, PositionResolver};
use crate::inspector::{
    NodeVisitor, PreorderVisitor, StackTraversal, StackVisitor, Traversal, Visit,
};

use super::{ExclusionPolicy, Interest};

/// Hides excluded source files from a [`StackTraversal`] engine and offers the
/// full [`Traversal`] surface on top of it.
pub struct StackFilter<T, R> {
    base: T,
    resolver: R,
    policy: ExclusionPolicy,
}

impl<T, R> StackFilter<T, R> {
    /// Wrap `base` with the default Go policy.
    pub fn new(base: T, resolver: R) -> Self {
        Self::with_policy(base, resolver, ExclusionPolicy::default())
    }

    pub fn with_policy(base: T, resolver: R, policy: ExclusionPolicy) -> Self {
        Self {
            base,
            resolver,
            policy,
        }
    }

    pub fn base(&self) -> &T {
        &self.base
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn policy(&self) -> &ExclusionPolicy {
        &self.policy
    }
}

impl<T, R: PositionResolver> StackFilter<T, R> {
    fn excluded(&self, unit: &Node) -> bool {
        self.policy.check(unit, &self.resolver)
    }
}

impl<'a, T: StackTraversal<'a>, R: PositionResolver> StackTraversal<'a> for StackFilter<T, R> {
    fn with_stack(&self, types: &[NodeKind], f: &mut StackVisitor<'_, 'a>) {
        let interest = Interest::selected(types);
        self.base.with_stack(&interest.types, &mut |n, push, stack| {
            if n.is_source_file() {
                // Decided once, on entry; an excluded file never gets an exit event.
                if push && self.excluded(n) {
                    return Visit::Prune;
                }
                if !interest.explicit {
                    return Visit::Descend;
                }
            }
            f(n, push, stack)
        });
    }
}

impl<'a, T: StackTraversal<'a>, R: PositionResolver> Traversal<'a> for StackFilter<T, R> {
    fn preorder(&self, types: &[NodeKind], f: &mut PreorderVisitor<'_, 'a>) {
        self.with_stack(types, &mut |n, push, _| {
            if push {
                f(n);
            }
            Visit::Descend
        });
    }

    fn nodes(&self, types: &[NodeKind], f: &mut NodeVisitor<'_, 'a>) {
        self.with_stack(types, &mut |n, push, _| f(n, push));
    }
}
