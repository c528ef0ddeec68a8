//! Integration tests for the filtering traversals.
//!
//! Trees are built by hand so that every node has a distinct position and
//! events can be compared by position. The reference for every filtered
//! stream is the raw engine run over the same tree with the excluded files
//! removed beforehand.

use prodinspect::inspector::StackVisitor;
use prodinspect::{
    Comment, CommentGroup, FileSet, Filter, Inspector, Node, NodeKind, Pos, StackFilter,
    StackTraversal, Traversal, Visit, SOURCE_FILE,
};

const GENERATED: &str = "// Code generated by protoc-gen-go. DO NOT EDIT.";

/// Exposes nothing but the stack primitive of an [`Inspector`].
struct StackOnly<'a>(Inspector<'a>);

impl<'a> StackTraversal<'a> for StackOnly<'a> {
    fn with_stack(&self, types: &[NodeKind], f: &mut StackVisitor<'_, 'a>) {
        self.0.with_stack(types, f)
    }
}

fn node(kind: NodeKind, pos: usize, children: Vec<Node>) -> Node {
    Node::new(kind, Pos(pos), Pos(pos + 1)).with_children(children)
}

/// A file shaped like:
///
/// ```go
/// package a
/// func one() { call() }
/// func two() {}
/// ```
fn go_file(fset: &mut FileSet, name: &str, comments: &[&str]) -> Node {
    let b = fset.add_file(name, 100).base();
    let groups = comments
        .iter()
        .enumerate()
        .map(|(i, text)| CommentGroup::new(vec![Comment::new(Pos(b + 50 + i), *text)]))
        .collect();
    node(
        SOURCE_FILE,
        b,
        vec![
            node("package_identifier", b + 1, vec![]),
            node(
                "function_declaration",
                b + 2,
                vec![
                    node("identifier", b + 3, vec![]),
                    node("parameter_list", b + 4, vec![]),
                    node(
                        "block",
                        b + 5,
                        vec![node(
                            "expression_statement",
                            b + 6,
                            vec![node(
                                "call_expression",
                                b + 7,
                                vec![node("identifier", b + 8, vec![])],
                            )],
                        )],
                    ),
                ],
            ),
            node(
                "function_declaration",
                b + 9,
                vec![
                    node("identifier", b + 10, vec![]),
                    node("parameter_list", b + 11, vec![]),
                    node("block", b + 12, vec![]),
                ],
            ),
        ],
    )
    .with_comments(groups)
}

/// Files `a.go`, `a_test.go`, `zz_generated.go`, `b.go`, and the indices of
/// the ones that must survive.
fn package() -> (FileSet, Vec<Node>, Vec<usize>) {
    let mut fset = FileSet::new();
    let files = vec![
        go_file(&mut fset, "a.go", &["// Package a does things."]),
        go_file(&mut fset, "a_test.go", &[]),
        go_file(&mut fset, "zz_generated.go", &["// Copyright 2024", GENERATED]),
        go_file(&mut fset, "b.go", &[]),
    ];
    (fset, files, vec![0, 3])
}

fn surviving(files: &[Node], keep: &[usize]) -> Vec<Node> {
    keep.iter().map(|&i| files[i].clone()).collect()
}

type StackEvent = (bool, Pos, Vec<Pos>);

fn preorder_events<'a>(t: &dyn Traversal<'a>, types: &[NodeKind]) -> Vec<Pos> {
    let mut events = Vec::new();
    t.preorder(types, &mut |n| events.push(n.pos));
    events
}

fn node_events<'a>(t: &dyn Traversal<'a>, types: &[NodeKind], prune: &[NodeKind]) -> Vec<(bool, Pos)> {
    let mut events = Vec::new();
    t.nodes(types, &mut |n, push| {
        events.push((push, n.pos));
        if prune.contains(&n.kind) {
            Visit::Prune
        } else {
            Visit::Descend
        }
    });
    events
}

fn stack_events<'a>(t: &dyn Traversal<'a>, types: &[NodeKind], prune: &[NodeKind]) -> Vec<StackEvent> {
    let mut events = Vec::new();
    t.with_stack(types, &mut |n, push, stack| {
        events.push((push, n.pos, stack.iter().map(|s| s.pos).collect()));
        if prune.contains(&n.kind) {
            Visit::Prune
        } else {
            Visit::Descend
        }
    });
    events
}

const TYPE_SETS: &[&[NodeKind]] = &[
    &[],
    &[SOURCE_FILE],
    &["function_declaration"],
    &["function_declaration", SOURCE_FILE],
    &[SOURCE_FILE, "call_expression", "identifier"],
    &["call_expression", "identifier"],
    &["no_such_kind"],
];

const PRUNE_SETS: &[&[NodeKind]] = &[&[], &["block"], &["function_declaration"], &[SOURCE_FILE]];

// =============================================================================
// Equivalence with the engine over the pruned tree
// =============================================================================

fn assert_matches_pruned_tree<'a>(filtered: &dyn Traversal<'a>, files: &'a [Node], keep: &[usize]) {
    let pruned = surviving(files, keep);
    let reference = Inspector::new(&pruned);

    for types in TYPE_SETS {
        assert_eq!(
            preorder_events(filtered, types),
            preorder_events(&reference, types),
            "preorder {types:?}"
        );
        for prune in PRUNE_SETS {
            assert_eq!(
                node_events(filtered, types, prune),
                node_events(&reference, types, prune),
                "nodes {types:?} prune {prune:?}"
            );
            assert_eq!(
                stack_events(filtered, types, prune),
                stack_events(&reference, types, prune),
                "with_stack {types:?} prune {prune:?}"
            );
        }
    }
}

#[test]
fn test_full_filter_equals_engine_without_excluded_files() {
    let (fset, files, keep) = package();
    let filter = Filter::new(Inspector::new(&files), &fset);
    assert_matches_pruned_tree(&filter, &files, &keep);
}

#[test]
fn test_stack_filter_equals_engine_without_excluded_files() {
    let (fset, files, keep) = package();
    let filter = StackFilter::new(StackOnly(Inspector::new(&files)), &fset);
    assert_matches_pruned_tree(&filter, &files, &keep);
}

#[test]
fn test_nothing_excluded_matches_raw_engine() {
    let mut fset = FileSet::new();
    let files = vec![go_file(&mut fset, "a.go", &[]), go_file(&mut fset, "b.go", &[])];
    let full = Filter::new(Inspector::new(&files), &fset);
    let stack = StackFilter::new(StackOnly(Inspector::new(&files)), &fset);
    assert_matches_pruned_tree(&full, &files, &[0, 1]);
    assert_matches_pruned_tree(&stack, &files, &[0, 1]);
}

#[test]
fn test_variants_agree_on_mixed_type_sets() {
    let (fset, files, _) = package();
    let full = Filter::new(Inspector::new(&files), &fset);
    let stack = StackFilter::new(StackOnly(Inspector::new(&files)), &fset);

    // Alternate empty and non-empty filters on the same instances.
    for (i, types) in TYPE_SETS.iter().chain(TYPE_SETS.iter().rev()).enumerate() {
        let prune = PRUNE_SETS[i % PRUNE_SETS.len()];
        assert_eq!(preorder_events(&full, types), preorder_events(&stack, types), "{types:?}");
        assert_eq!(
            node_events(&full, types, prune),
            node_events(&stack, types, prune),
            "{types:?}"
        );
        assert_eq!(
            stack_events(&full, types, prune),
            stack_events(&stack, types, prune),
            "{types:?}"
        );
    }
}

// =============================================================================
// Scenarios
// =============================================================================

/// One file with two declarations, each holding one call.
fn two_calls(fset: &mut FileSet, name: &str) -> Node {
    let b = fset.add_file(name, 100).base();
    node(
        SOURCE_FILE,
        b,
        vec![
            node("function_declaration", b + 1, vec![node("call_expression", b + 2, vec![])]),
            node("function_declaration", b + 3, vec![node("call_expression", b + 4, vec![])]),
        ],
    )
}

#[test]
fn test_wildcard_yields_every_pair_in_nesting_order() {
    let mut fset = FileSet::new();
    let files = vec![two_calls(&mut fset, "main.go")];
    let b = files[0].pos.0;
    let expected = vec![
        (true, Pos(b)),
        (true, Pos(b + 1)),
        (true, Pos(b + 2)),
        (false, Pos(b + 2)),
        (false, Pos(b + 1)),
        (true, Pos(b + 3)),
        (true, Pos(b + 4)),
        (false, Pos(b + 4)),
        (false, Pos(b + 3)),
        (false, Pos(b)),
    ];

    let full = Filter::new(Inspector::new(&files), &fset);
    let stack = StackFilter::new(StackOnly(Inspector::new(&files)), &fset);
    assert_eq!(node_events(&full, &[], &[]), expected);
    assert_eq!(node_events(&stack, &[], &[]), expected);
}

#[test]
fn test_test_file_yields_nothing_for_any_filter() {
    let mut fset = FileSet::new();
    let files = vec![two_calls(&mut fset, "main_test.go")];
    let full = Filter::new(Inspector::new(&files), &fset);
    let stack = StackFilter::new(StackOnly(Inspector::new(&files)), &fset);

    for types in TYPE_SETS {
        for t in [&full as &dyn Traversal<'_>, &stack] {
            assert!(preorder_events(t, types).is_empty(), "{types:?}");
            assert!(node_events(t, types, &[]).is_empty(), "{types:?}");
            assert!(stack_events(t, types, &[]).is_empty(), "{types:?}");
        }
    }
}

#[test]
fn test_generated_file_yields_nothing() {
    let mut fset = FileSet::new();
    let files = vec![go_file(&mut fset, "api.pb.go", &[GENERATED])];
    let full = Filter::new(Inspector::new(&files), &fset);
    let stack = StackFilter::new(StackOnly(Inspector::new(&files)), &fset);
    for t in [&full as &dyn Traversal<'_>, &stack] {
        assert!(preorder_events(t, &[]).is_empty());
        assert!(node_events(t, &[SOURCE_FILE], &[]).is_empty());
        assert!(stack_events(t, &["call_expression"], &[]).is_empty());
    }
}

#[test]
fn test_non_file_filter_omits_file_but_walks_through_it() {
    let mut fset = FileSet::new();
    let files = vec![two_calls(&mut fset, "main.go")];
    let b = files[0].pos.0;
    let full = Filter::new(Inspector::new(&files), &fset);
    let stack = StackFilter::new(StackOnly(Inspector::new(&files)), &fset);

    for t in [&full as &dyn Traversal<'_>, &stack] {
        assert_eq!(
            node_events(t, &["function_declaration"], &[]),
            vec![
                (true, Pos(b + 1)),
                (false, Pos(b + 1)),
                (true, Pos(b + 3)),
                (false, Pos(b + 3)),
            ]
        );
        assert_eq!(
            preorder_events(t, &["call_expression"]),
            vec![Pos(b + 2), Pos(b + 4)]
        );
    }
}

#[test]
fn test_preorder_with_file_and_declarations() {
    let mut fset = FileSet::new();
    let files = vec![go_file(&mut fset, "foo.go", &[])];
    let b = files[0].pos.0;
    let full = Filter::new(Inspector::new(&files), &fset);
    let stack = StackFilter::new(StackOnly(Inspector::new(&files)), &fset);

    for t in [&full as &dyn Traversal<'_>, &stack] {
        assert_eq!(
            preorder_events(t, &[SOURCE_FILE, "function_declaration"]),
            vec![Pos(b), Pos(b + 2), Pos(b + 9)]
        );
        assert_eq!(preorder_events(t, &[]).len(), files[0].len());
    }
}

// =============================================================================
// Ancestor stacks
// =============================================================================

#[test]
fn test_stack_starts_at_file_even_when_file_is_hidden() {
    let (fset, files, _) = package();
    let full = Filter::new(Inspector::new(&files), &fset);
    let stack = StackFilter::new(StackOnly(Inspector::new(&files)), &fset);

    for t in [&full as &dyn Traversal<'_>, &stack] {
        let mut count = 0;
        t.with_stack(&["function_declaration", "identifier"], &mut |n, _, s| {
            count += 1;
            assert_ne!(n.kind, SOURCE_FILE);
            assert_eq!(s[0].kind, SOURCE_FILE);
            assert!(std::ptr::eq(*s.last().unwrap(), n));
            let file = fset
                .files()
                .iter()
                .find(|f| f.contains(s[0].pos))
                .map(|f| f.name().to_string());
            assert!(matches!(file.as_deref(), Some("a.go") | Some("b.go")));
            Visit::Descend
        });
        // Two declarations and three identifiers per surviving file, both events each.
        assert_eq!(count, 2 * 2 * (2 + 3));
    }
}

#[test]
fn test_stack_for_declarations_only() {
    let mut fset = FileSet::new();
    let files = vec![go_file(&mut fset, "foo.go", &[])];
    let b = files[0].pos.0;
    let stack = StackFilter::new(StackOnly(Inspector::new(&files)), &fset);

    assert_eq!(
        stack_events(&stack, &["function_declaration"], &[]),
        vec![
            (true, Pos(b + 2), vec![Pos(b), Pos(b + 2)]),
            (false, Pos(b + 2), vec![Pos(b), Pos(b + 2)]),
            (true, Pos(b + 9), vec![Pos(b), Pos(b + 9)]),
            (false, Pos(b + 9), vec![Pos(b), Pos(b + 9)]),
        ]
    );
}

// =============================================================================
// Reuse
// =============================================================================

#[test]
fn test_repeated_traversals_are_identical() {
    let (fset, files, _) = package();
    let full = Filter::new(Inspector::new(&files), &fset);
    let stack = StackFilter::new(StackOnly(Inspector::new(&files)), &fset);

    for t in [&full as &dyn Traversal<'_>, &stack] {
        for types in TYPE_SETS {
            assert_eq!(preorder_events(t, types), preorder_events(t, types));
            assert_eq!(
                stack_events(t, types, &["block"]),
                stack_events(t, types, &["block"])
            );
        }
    }
}

#[test]
fn test_policy_is_evaluated_once_per_file() {
    use prodinspect::{File, PositionResolver};
    use std::cell::Cell;

    struct Counting<'f> {
        fset: &'f FileSet,
        calls: Cell<usize>,
    }

    impl PositionResolver for Counting<'_> {
        fn file(&self, pos: Pos) -> Option<&File> {
            self.calls.set(self.calls.get() + 1);
            self.fset.file(pos)
        }
    }

    let (fset, files, _) = package();
    let resolver = Counting {
        fset: &fset,
        calls: Cell::new(0),
    };
    let filter = Filter::new(Inspector::new(&files), &resolver);
    node_events(&filter, &["identifier"], &[]);
    assert_eq!(resolver.calls.get(), files.len());
}
