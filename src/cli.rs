//! Command-line interface for prodinspect.

use clap::{Parser, Subcommand, ValueEnum};
use std::io;
use std::path::{Path, PathBuf};

use crate::analyzer::Pass;
use crate::ast::NodeKind;
use crate::config::FilterConfig;
use crate::inspector::Traversal;
use crate::report::{self, FileRecord};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_EMPTY: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Walk Go syntax trees while skipping test files and generated files.
#[derive(Parser)]
#[command(name = "prodinspect")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log level when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the nodes that survive filtering
    Nodes(NodesArgs),
    /// List Go files and whether they are excluded
    Files(FilesArgs),
}

/// Output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Pretty,
    Json,
}

/// Which filter implementation drives the traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// Wraps every native engine operation
    Full,
    /// Derives everything from the stack-aware primitive
    Stack,
    /// No filtering at all
    None,
}

/// Arguments for the nodes command.
#[derive(Parser)]
pub struct NodesArgs {
    /// Path to inspect (file or directory)
    pub path: PathBuf,

    /// Comma-separated node kinds to report (default: every kind)
    #[arg(short, long, value_delimiter = ',')]
    pub types: Vec<String>,

    /// Path to configuration YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub format: Format,

    /// Print entry/exit events with stack depth instead of a preorder listing
    #[arg(long)]
    pub events: bool,

    /// Filter implementation
    #[arg(long, value_enum, default_value = "full")]
    pub variant: Variant,
}

/// Arguments for the files command.
#[derive(Parser)]
pub struct FilesArgs {
    /// Path to inspect (file or directory)
    pub path: PathBuf,

    /// Path to configuration YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub format: Format,
}

/// Load the configuration and the package at `path`.
fn load_pass(path: &Path, config: Option<&Path>) -> anyhow::Result<Pass> {
    let cwd = std::env::current_dir()?;
    let config = FilterConfig::load_or_default(config, &cwd)?;
    let pass = Pass::load(path, &config)?;
    Ok(pass)
}

/// Node kinds are `'static` tags, so the names typed on the command line live
/// for the rest of the process.
fn node_kinds(types: &[String]) -> Vec<NodeKind> {
    types
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(|t| -> NodeKind { Box::leak(t.to_string().into_boxed_str()) })
        .collect()
}

/// Run the nodes command.
pub fn run_nodes(args: &NodesArgs) -> anyhow::Result<i32> {
    let pass = load_pass(&args.path, args.config.as_deref())?;
    if pass.files().is_empty() {
        eprintln!("Warning: no Go files found under {}", args.path.display());
        return Ok(EXIT_EMPTY);
    }

    let types = node_kinds(&args.types);
    let inspector = pass.inspector();
    let filter = pass.filter();
    let stack_filter = pass.stack_filter();
    let traversal: &dyn Traversal<'_> = match args.variant {
        Variant::Full => &filter,
        Variant::Stack => &stack_filter,
        Variant::None => &inspector,
    };

    let mut out = io::stdout().lock();
    let surfaced = if args.events {
        let records = report::collect_events(traversal, &types, pass.fset());
        match args.format {
            Format::Json => report::write_json(&mut out, &records)?,
            Format::Pretty => report::write_events_pretty(&mut out, &records)?,
        }
        records.len()
    } else {
        let records = report::collect_nodes(traversal, &types, pass.fset());
        match args.format {
            Format::Json => report::write_json(&mut out, &records)?,
            Format::Pretty => report::write_nodes_pretty(&mut out, &records)?,
        }
        records.len()
    };

    if surfaced == 0 {
        Ok(EXIT_EMPTY)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Run the files command.
pub fn run_files(args: &FilesArgs) -> anyhow::Result<i32> {
    let pass = load_pass(&args.path, args.config.as_deref())?;

    let records: Vec<FileRecord> = pass
        .summary()
        .into_iter()
        .map(|s| FileRecord {
            file: s.name,
            excluded: s.exclusion.is_some(),
            reason: s.exclusion.map(|e| e.to_string()),
            nodes: s.nodes,
        })
        .collect();

    let mut out = io::stdout().lock();
    match args.format {
        Format::Json => report::write_json(&mut out, &records)?,
        Format::Pretty => report::write_files_pretty(&mut out, &records)?,
    }

    Ok(EXIT_SUCCESS)
}
