//! Analysis pass: loads a Go package and hands out traversal facilities.
//!
//! A [`Pass`] owns the parsed files and their [`FileSet`]. Downstream checks
//! get a [`Filter`] (or [`StackFilter`]) as a plain `&dyn Traversal` and never
//! learn that test files and generated files were hidden from them.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::ast::{FileSet, Node, PositionResolver};
use crate::config::{ConfigError, FilterConfig};
use crate::filter::{Exclusion, ExclusionPolicy, Filter, StackFilter};
use crate::inspector::Inspector;
use crate::parser::{GoParser, ParseError};

/// Directories never descended into while collecting files.
const SKIPPED_DIRS: &[&str] = &["vendor", "testdata", "node_modules"];

/// Errors raised while loading a package.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("walking directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// One file of the pass and its exclusion status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub name: String,
    pub exclusion: Option<Exclusion>,
    /// Number of nodes in the file's tree.
    pub nodes: usize,
}

/// Parsed package plus the policy used to filter it.
pub struct Pass {
    fset: FileSet,
    files: Vec<Node>,
    policy: ExclusionPolicy,
}

impl Pass {
    /// Assemble a pass from already-parsed files.
    pub fn new(fset: FileSet, files: Vec<Node>, policy: ExclusionPolicy) -> Self {
        Self {
            fset,
            files,
            policy,
        }
    }

    /// Load every `.go` file under `path` (or `path` itself if it is a file).
    ///
    /// File names are recorded relative to `path`, in sorted order. Hidden
    /// directories, `vendor`, `testdata` and `excluded_paths` are skipped.
    pub fn load<P: AsRef<Path>>(path: P, config: &FilterConfig) -> Result<Self, LoadError> {
        let root = path.as_ref();
        let policy = ExclusionPolicy::from_config(config)?;
        let excluded = config.excluded_path_matcher()?;

        let mut paths = Vec::new();
        if root.is_file() {
            paths.push(root.to_path_buf());
        } else {
            for entry in WalkDir::new(root)
                .follow_links(true)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|e| {
                    let name = e.file_name().to_string_lossy();
                    if e.depth() > 0 && e.file_type().is_dir() {
                        return !name.starts_with('.') && !SKIPPED_DIRS.iter().any(|d| *d == name);
                    }
                    true
                })
            {
                let entry = entry?;
                let path = entry.path();
                if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some("go") {
                    continue;
                }
                if excluded.is_match(relative_name(root, path)) {
                    tracing::debug!(file = %path.display(), "excluded by path glob");
                    continue;
                }
                paths.push(path.to_path_buf());
            }
        }

        let mut sources = Vec::with_capacity(paths.len());
        for path in &paths {
            let source = fs::read(path).map_err(|e| LoadError::Io {
                path: path.clone(),
                source: e,
            })?;
            let name = if root.is_file() {
                path.file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default()
            } else {
                relative_name(root, path)
            };
            sources.push((name, source));
        }

        Self::from_sources(sources, policy)
    }

    /// Parse in-memory sources, in the given order.
    pub fn from_sources<N, S>(sources: Vec<(N, S)>, policy: ExclusionPolicy) -> Result<Self, LoadError>
    where
        N: AsRef<str>,
        S: AsRef<[u8]>,
    {
        let parser = GoParser::new();
        let mut fset = FileSet::new();
        let mut files = Vec::with_capacity(sources.len());

        for (name, source) in &sources {
            match parser.parse_file(&mut fset, name.as_ref(), source.as_ref()) {
                Ok(file) => files.push(file),
                Err(ParseError::Failed { path }) => {
                    // Keep going - one unparseable file should not hide the rest
                    tracing::warn!(file = %path.display(), "skipping unparseable file");
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::debug!(files = files.len(), "loaded package");
        Ok(Self::new(fset, files, policy))
    }

    pub fn fset(&self) -> &FileSet {
        &self.fset
    }

    /// Parsed files, one `source_file` node each.
    pub fn files(&self) -> &[Node] {
        &self.files
    }

    pub fn policy(&self) -> &ExclusionPolicy {
        &self.policy
    }

    /// The unfiltered engine.
    pub fn inspector(&self) -> Inspector<'_> {
        Inspector::new(&self.files)
    }

    /// Traversal over production files, using every native engine operation.
    pub fn filter(&self) -> Filter<Inspector<'_>, &FileSet> {
        Filter::with_policy(self.inspector(), &self.fset, self.policy.clone())
    }

    /// Traversal over production files, built on the stack primitive alone.
    pub fn stack_filter(&self) -> StackFilter<Inspector<'_>, &FileSet> {
        StackFilter::with_policy(self.inspector(), &self.fset, self.policy.clone())
    }

    /// Every file of the pass with its exclusion status.
    pub fn summary(&self) -> Vec<FileSummary> {
        self.files
            .iter()
            .map(|node| FileSummary {
                name: self
                    .fset
                    .file(node.pos)
                    .map(|f| f.name().to_string())
                    .unwrap_or_default(),
                exclusion: self.policy.exclusion(node, &self.fset),
                nodes: node.len(),
            })
            .collect()
    }
}

/// Path of `path` relative to `root`, with `/` separators.
fn relative_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
