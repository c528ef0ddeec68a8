//! The native depth-first engine.

use crate::ast::{Node, NodeKind};

use super::{matches, NodeVisitor, PreorderVisitor, StackTraversal, StackVisitor, Traversal, Visit};

/// Traversal engine over a list of root nodes (normally one per source file).
///
/// Every node is walked; the type set only decides which nodes produce
/// events. Non-matching nodes are always descended into.
#[derive(Debug, Clone, Copy)]
pub struct Inspector<'a> {
    roots: &'a [Node],
}

impl<'a> Inspector<'a> {
    pub fn new(roots: &'a [Node]) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &'a [Node] {
        self.roots
    }
}

fn walk_preorder<'a>(node: &'a Node, types: &[NodeKind], f: &mut PreorderVisitor<'_, 'a>) {
    if matches(types, node.kind) {
        f(node);
    }
    for child in &node.children {
        walk_preorder(child, types, f);
    }
}

fn walk_with_stack<'a>(
    node: &'a Node,
    types: &[NodeKind],
    stack: &mut Vec<&'a Node>,
    f: &mut StackVisitor<'_, 'a>,
) {
    stack.push(node);
    let matched = matches(types, node.kind);
    if !matched || f(node, true, stack) == Visit::Descend {
        for child in &node.children {
            walk_with_stack(child, types, stack, f);
        }
        if matched {
            f(node, false, stack);
        }
    }
    stack.pop();
}

impl<'a> StackTraversal<'a> for Inspector<'a> {
    fn with_stack(&self, types: &[NodeKind], f: &mut StackVisitor<'_, 'a>) {
        let mut stack = Vec::new();
        for root in self.roots {
            walk_with_stack(root, types, &mut stack, f);
        }
    }
}

impl<'a> Traversal<'a> for Inspector<'a> {
    fn preorder(&self, types: &[NodeKind], f: &mut PreorderVisitor<'_, 'a>) {
        for root in self.roots {
            walk_preorder(root, types, f);
        }
    }

    fn nodes(&self, types: &[NodeKind], f: &mut NodeVisitor<'_, 'a>) {
        self.with_stack(types, &mut |n, push, _| f(n, push));
    }
}
