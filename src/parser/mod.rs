//! Source front ends producing [`Node`](crate::ast::Node) trees.
//!
//! Each parsed file is registered in a [`FileSet`](crate::ast::FileSet) so
//! that node positions resolve back to the file name.

mod go;

use std::path::PathBuf;

use thiserror::Error;

pub use go::GoParser;

/// Errors raised while parsing a source file.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("loading grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    #[error("failed to parse {}", path.display())]
    Failed { path: PathBuf },
}
