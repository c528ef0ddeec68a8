//! Go front end using tree-sitter.
//!
//! Only named nodes are kept, so the tree mirrors the shape of a Go AST
//! rather than the token stream. Comments are lifted out of the tree and
//! attached, grouped, to the `source_file` node.

use std::path::Path;

use tree_sitter::{Language, Parser};

use super::ParseError;
use crate::ast::{Comment, CommentGroup, FileSet, Node, Pos};

const COMMENT_KIND: &str = "comment";

/// A comment with the rows it spans, before grouping.
struct RawComment {
    start_row: usize,
    end_row: usize,
    comment: Comment,
}

/// Go parser.
pub struct GoParser {
    language: Language,
}

impl Default for GoParser {
    fn default() -> Self {
        Self::new()
    }
}

impl GoParser {
    /// Create a new Go parser.
    pub fn new() -> Self {
        Self {
            language: tree_sitter_go::LANGUAGE.into(),
        }
    }

    /// Create a new parser for this thread.
    fn create_parser(&self) -> Result<Parser, ParseError> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        Ok(parser)
    }

    /// Parse `source`, register it in `fset` under `name`, and return the
    /// `source_file` node.
    ///
    /// Syntax errors do not fail the parse; they show up as `ERROR` nodes.
    pub fn parse_file(
        &self,
        fset: &mut FileSet,
        name: &str,
        source: &[u8],
    ) -> Result<Node, ParseError> {
        let mut parser = self.create_parser()?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ParseError::Failed {
                path: Path::new(name).to_path_buf(),
            })?;

        let root = tree.root_node();
        if root.has_error() {
            tracing::warn!(file = name, "syntax errors in source file");
        }

        let file = fset.add_file(name, source.len());
        file.set_lines_for_content(source);
        let base = file.base();

        let mut comments = Vec::new();
        let mut node = convert(root, base, source, &mut comments);
        node.comments = group_comments(comments);
        Ok(node)
    }
}

fn convert(
    node: tree_sitter::Node,
    base: usize,
    source: &[u8],
    comments: &mut Vec<RawComment>,
) -> Node {
    let mut children = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == COMMENT_KIND {
            let text = child.utf8_text(source).unwrap_or("");
            comments.push(RawComment {
                start_row: child.start_position().row,
                end_row: child.end_position().row,
                comment: Comment::new(Pos(base + child.start_byte()), text.trim_end_matches('\r')),
            });
            continue;
        }
        children.push(convert(child, base, source, comments));
    }

    Node::new(
        node.kind(),
        Pos(base + node.start_byte()),
        Pos(base + node.end_byte()),
    )
    .with_children(children)
}

/// Split comments (in source order) into groups separated by blank lines.
fn group_comments(comments: Vec<RawComment>) -> Vec<CommentGroup> {
    let mut groups: Vec<CommentGroup> = Vec::new();
    let mut last_row = None;

    for raw in comments {
        match last_row {
            Some(row) if raw.start_row <= row + 1 => {
                if let Some(group) = groups.last_mut() {
                    group.list.push(raw.comment);
                }
            }
            _ => groups.push(CommentGroup::new(vec![raw.comment])),
        }
        last_row = Some(raw.end_row);
    }

    groups
}
