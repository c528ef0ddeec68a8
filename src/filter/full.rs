//! Filter over an engine that offers every traversal operation natively.

use crate::ast::{Node, NodeKind, PositionResolver};
use crate::inspector::{
    NodeVisitor, PreorderVisitor, StackTraversal, StackVisitor, Traversal, Visit,
};

use super::{ExclusionPolicy, Interest};

/// Hides excluded source files from a full [`Traversal`] engine.
///
/// Each operation forwards to the engine's own implementation of it and
/// applies the exclusion check inline.
pub struct Filter<T, R> {
    base: T,
    resolver: R,
    policy: ExclusionPolicy,
}

impl<T, R> Filter<T, R> {
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

impl<T, R: PositionResolver> Filter<T, R> {
    fn excluded(&self, unit: &Node) -> bool {
        self.policy.check(unit, &self.resolver)
    }
}

impl<'a, T: StackTraversal<'a>, R: PositionResolver> StackTraversal<'a> for Filter<T, R> {
    fn with_stack(&self, types: &[NodeKind], f: &mut StackVisitor<'_, 'a>) {
        let interest = Interest::listed(types);
        self.base.with_stack(&interest.types, &mut |n, push, stack| {
            if n.is_source_file() {
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

impl<'a, T: Traversal<'a>, R: PositionResolver> Traversal<'a> for Filter<T, R> {
    /// Preorder offers no pruning, so an excluded file switches forwarding off
    /// until the next source file starts. Source files are traversal roots,
    /// hence every node between two of them belongs to the first.
    fn preorder(&self, types: &[NodeKind], f: &mut PreorderVisitor<'_, 'a>) {
        let interest = Interest::listed(types);
        let mut skipping = false;
        self.base.preorder(&interest.types, &mut |n| {
            if n.is_source_file() {
                skipping = self.excluded(n);
                if skipping || !interest.explicit {
                    return;
                }
            } else if skipping {
                return;
            }
            f(n)
        });
    }

    fn nodes(&self, types: &[NodeKind], f: &mut NodeVisitor<'_, 'a>) {
        let interest = Interest::listed(types);
        self.base.nodes(&interest.types, &mut |n, push| {
            if n.is_source_file() {
                if push && self.excluded(n) {
                    return Visit::Prune;
                }
                if !interest.explicit {
                    return Visit::Descend;
                }
            }
            f(n, push)
        });
    }
}
