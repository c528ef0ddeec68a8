//! Syntax tree model shared by the traversal engine and the filters.
//!
//! Nodes are plain owned values: a type tag, a position range inside a
//! [`FileSet`], ordered children, and (for source files only) the comment
//! groups of the file. Comment nodes never appear as children.

pub mod fileset;

use std::fmt;

pub use fileset::{File, FileSet, Position, PositionResolver};

/// Dynamic type tag of a node (tree-sitter kind name, e.g. `"call_expression"`).
pub type NodeKind = &'static str;

/// Tag of the node representing one whole source file.
pub const SOURCE_FILE: NodeKind = "source_file";

/// Offset into a [`FileSet`]. Zero means "no position".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Pos(pub usize);

impl Pos {
    /// The invalid position.
    pub const NONE: Pos = Pos(0);

    pub fn is_valid(self) -> bool {
        self.0 != 0
    }

    /// Position `n` bytes after this one.
    pub fn offset(self, n: usize) -> Pos {
        Pos(self.0 + n)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single `//` or `/* */` comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub pos: Pos,
    /// Full comment text including the comment markers, without a trailing newline.
    pub text: String,
}

impl Comment {
    pub fn new(pos: Pos, text: impl Into<String>) -> Self {
        Self {
            pos,
            text: text.into(),
        }
    }
}

/// A run of comments with no blank line between them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentGroup {
    pub list: Vec<Comment>,
}

impl CommentGroup {
    pub fn new(list: Vec<Comment>) -> Self {
        Self { list }
    }

    /// Starting position of the first comment in the group.
    pub fn pos(&self) -> Pos {
        self.list.first().map(|c| c.pos).unwrap_or(Pos::NONE)
    }
}

/// A syntax tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub pos: Pos,
    pub end: Pos,
    pub children: Vec<Node>,
    /// Comment groups of the file, in source order. Empty unless `kind == SOURCE_FILE`.
    pub comments: Vec<CommentGroup>,
}

impl Node {
    /// Create a leaf node.
    pub fn new(kind: NodeKind, pos: Pos, end: Pos) -> Self {
        Self {
            kind,
            pos,
            end,
            children: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// Builder-style child list.
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Builder-style comment groups (meaningful on source files).
    pub fn with_comments(mut self, comments: Vec<CommentGroup>) -> Self {
        self.comments = comments;
        self
    }

    /// Whether this node is a whole source file.
    pub fn is_source_file(&self) -> bool {
        self.kind == SOURCE_FILE
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(Node::len).sum::<usize>()
    }

    /// Always false; a node counts itself.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over every comment of the file in source order.
    pub fn comment_lines(&self) -> impl Iterator<Item = &Comment> {
        self.comments.iter().flat_map(|g| g.list.iter())
    }
}
