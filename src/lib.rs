//! Prodinspect - syntax-tree traversal over production code only.
//!
//! Prodinspect wraps a depth-first tree-walking engine and hides every source
//! file that is a test file (`*_test.go`) or generated code (a
//! `// Code generated ... DO NOT EDIT.` comment line). Downstream checks walk
//! the filtered traversal exactly as they would walk the raw engine, and see
//! the same event stream they would get if the hidden files had never existed.
//!
//! # Architecture
//!
//! - `ast`: node model, positions and the file set resolving them
//! - `inspector`: traversal traits and the native engine
//! - `filter`: exclusion policy and the two filtering decorators
//! - `parser`: tree-sitter Go front end
//! - `analyzer`: loads a package and hands out filtered traversals
//! - `config`: YAML configuration
//! - `report`: output formatting (text, JSON)
//!
//! # Example
//!
//! ```
//! use prodinspect::{FileSet, Filter, Inspector, Node, Pos, Traversal, SOURCE_FILE};
//!
//! let mut fset = FileSet::new();
//! let base = fset.add_file("a_test.go", 10).base();
//! let files = vec![Node::new(SOURCE_FILE, Pos(base), Pos(base + 10))];
//!
//! let filter = Filter::new(Inspector::new(&files), &fset);
//! let mut seen = 0;
//! filter.preorder(&[], &mut |_| seen += 1);
//! assert_eq!(seen, 0);
//! ```

#[cfg(feature = "tree-sitter")]
pub mod analyzer;
pub mod ast;
#[cfg(feature = "tree-sitter")]
pub mod cli;
pub mod config;
pub mod filter;
pub mod inspector;
#[cfg(feature = "tree-sitter")]
pub mod parser;
pub mod report;

#[cfg(feature = "tree-sitter")]
pub use analyzer::{FileSummary, LoadError, Pass};
pub use ast::{
    Comment, CommentGroup, File, FileSet, Node, NodeKind, Pos, Position, PositionResolver,
    SOURCE_FILE,
};
pub use config::{ConfigError, FilterConfig};
pub use filter::{Exclusion, ExclusionPolicy, Filter, StackFilter};
pub use inspector::{Inspector, StackTraversal, Traversal, Visit};
#[cfg(feature = "tree-sitter")]
pub use parser::{GoParser, ParseError};
