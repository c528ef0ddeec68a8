//! File sets map global [`Pos`] values back to the file that owns them.

use std::fmt;

use super::Pos;

/// Resolves a position to the file containing it.
///
/// Implementations must be consistent for the duration of a traversal.
pub trait PositionResolver {
    /// Returns the file containing `pos`, or `None` if it is unknown.
    fn file(&self, pos: Pos) -> Option<&File>;
}

impl<R: PositionResolver + ?Sized> PositionResolver for &R {
    fn file(&self, pos: Pos) -> Option<&File> {
        (**self).file(pos)
    }
}

/// Human-readable location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub filename: String,
    /// 1-indexed line.
    pub line: usize,
    /// 1-indexed column, in bytes.
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}

/// One file registered in a [`FileSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    name: String,
    base: usize,
    size: usize,
    /// Byte offsets of the first character of each line.
    lines: Vec<usize>,
}

impl File {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base(&self) -> usize {
        self.base
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Position of byte `offset` in this file.
    pub fn pos(&self, offset: usize) -> Pos {
        Pos(self.base + offset.min(self.size))
    }

    /// Whether `pos` falls inside this file (the end-of-file position included).
    pub fn contains(&self, pos: Pos) -> bool {
        pos.0 >= self.base && pos.0 <= self.base + self.size
    }

    /// Record line starts from the file content.
    pub fn set_lines_for_content(&mut self, content: &[u8]) {
        self.lines = std::iter::once(0)
            .chain(
                content
                    .iter()
                    .enumerate()
                    .filter(|(i, &b)| b == b'\n' && i + 1 < content.len())
                    .map(|(i, _)| i + 1),
            )
            .collect();
    }

    /// Line/column for `pos`. Falls back to line 1 when no line table was recorded.
    pub fn position(&self, pos: Pos) -> Position {
        let offset = pos.0.saturating_sub(self.base);
        let line = match self.lines.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let line_start = self.lines.get(line).copied().unwrap_or(0);
        Position {
            filename: self.name.clone(),
            line: line + 1,
            column: offset - line_start + 1,
        }
    }
}

/// An ordered collection of files sharing one position space.
#[derive(Debug, Clone, Default)]
pub struct FileSet {
    files: Vec<File>,
    next_base: usize,
}

impl FileSet {
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            next_base: 1,
        }
    }

    /// Register a file of `size` bytes and return it.
    ///
    /// Bases are assigned consecutively, leaving one position of slack after
    /// each file so that the end-of-file position stays unambiguous.
    pub fn add_file(&mut self, name: impl Into<String>, size: usize) -> &mut File {
        let base = self.next_base.max(1);
        self.next_base = base + size + 1;
        self.files.push(File {
            name: name.into(),
            base,
            size,
            lines: vec![0],
        });
        let last = self.files.len() - 1;
        &mut self.files[last]
    }

    /// All registered files, in registration order.
    pub fn files(&self) -> &[File] {
        &self.files
    }

    /// Line/column for `pos`, if it belongs to a known file.
    pub fn position(&self, pos: Pos) -> Option<Position> {
        self.file(pos).map(|f| f.position(pos))
    }
}

impl PositionResolver for FileSet {
    fn file(&self, pos: Pos) -> Option<&File> {
        if !pos.is_valid() {
            return None;
        }
        // Files are sorted by base, so the owner is the last one starting at or before pos.
        let idx = self.files.partition_point(|f| f.base <= pos.0);
        let file = self.files.get(idx.checked_sub(1)?)?;
        file.contains(pos).then_some(file)
    }
}
