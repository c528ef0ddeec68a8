//! Output formatting for traversal results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::ast::{FileSet, Node, NodeKind};
use crate::inspector::{Traversal, Visit};

// =============================================================================
// Records
// =============================================================================

/// One surfaced node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub kind: String,
    pub file: String,
    pub line: usize,
    pub column: usize,
}

/// One entry or exit event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// "enter" or "exit"
    pub event: String,
    /// Length of the ancestor stack, the node included.
    pub depth: usize,
    #[serde(flatten)]
    pub node: NodeRecord,
}

/// One file and why it is hidden, if it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub file: String,
    pub excluded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub nodes: usize,
}

fn record(node: &Node, fset: &FileSet) -> NodeRecord {
    let position = fset.position(node.pos);
    NodeRecord {
        kind: node.kind.to_string(),
        file: position
            .as_ref()
            .map(|p| p.filename.clone())
            .unwrap_or_default(),
        line: position.as_ref().map(|p| p.line).unwrap_or(0),
        column: position.as_ref().map(|p| p.column).unwrap_or(0),
    }
}

/// Run a preorder traversal and record every surfaced node.
pub fn collect_nodes<'a>(
    traversal: &dyn Traversal<'a>,
    types: &[NodeKind],
    fset: &FileSet,
) -> Vec<NodeRecord> {
    let mut records = Vec::new();
    traversal.preorder(types, &mut |n| records.push(record(n, fset)));
    records
}

/// Run a stack traversal and record every entry and exit event.
pub fn collect_events<'a>(
    traversal: &dyn Traversal<'a>,
    types: &[NodeKind],
    fset: &FileSet,
) -> Vec<EventRecord> {
    let mut records = Vec::new();
    traversal.with_stack(types, &mut |n, push, stack| {
        records.push(EventRecord {
            event: if push { "enter" } else { "exit" }.to_string(),
            depth: stack.len(),
            node: record(n, fset),
        });
        Visit::Descend
    });
    records
}

// =============================================================================
// JSON Format
// =============================================================================

/// Write any record list as pretty-printed JSON.
pub fn write_json<W: Write, T: Serialize>(out: &mut W, records: &[T]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    writeln!(out, "{}", json)?;
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write surfaced nodes, one per line.
pub fn write_nodes_pretty<W: Write>(out: &mut W, records: &[NodeRecord]) -> anyhow::Result<()> {
    for r in records {
        writeln!(
            out,
            "{}:{}:{}  {}",
            r.file,
            r.line,
            r.column,
            r.kind.cyan()
        )?;
    }
    writeln!(out)?;
    writeln!(out, "{} node(s)", records.len().to_string().bold())?;
    Ok(())
}

/// Write events indented by stack depth.
pub fn write_events_pretty<W: Write>(out: &mut W, records: &[EventRecord]) -> anyhow::Result<()> {
    for r in records {
        let marker = if r.event == "enter" {
            "+".green()
        } else {
            "-".red()
        };
        writeln!(
            out,
            "{}{} {}  {}:{}:{}",
            "  ".repeat(r.depth.saturating_sub(1)),
            marker,
            r.node.kind.cyan(),
            r.node.file,
            r.node.line,
            r.node.column
        )?;
    }
    Ok(())
}

/// Write the file listing.
pub fn write_files_pretty<W: Write>(out: &mut W, records: &[FileRecord]) -> anyhow::Result<()> {
    let width = records.iter().map(|r| r.file.len()).max().unwrap_or(0);
    for r in records {
        let status = match &r.reason {
            Some(reason) => format!("excluded ({})", reason).yellow(),
            None => "included".green(),
        };
        writeln!(out, "{:<width$}  {}", r.file, status, width = width)?;
    }
    let excluded = records.iter().filter(|r| r.excluded).count();
    writeln!(out)?;
    writeln!(
        out,
        "{} file(s), {} excluded",
        records.len().to_string().bold(),
        excluded.to_string().bold()
    )?;
    Ok(())
}
