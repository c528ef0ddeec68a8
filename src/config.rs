//! Filter configuration.
//!
//! Loaded from `prodinspect.yaml` (or `.prodinspect.yaml`) when present;
//! every field is optional and defaults to the Go conventions.

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::filter::{GENERATED_MARKER, TEST_FILE_SUFFIX};

/// Default configuration file names to search for.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["prodinspect.yaml", ".prodinspect.yaml"];

/// Errors raised while loading or validating a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid generated-file pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("invalid excluded path glob {glob:?}: {source}")]
    InvalidGlob {
        glob: String,
        #[source]
        source: globset::Error,
    },
}

/// Which files count as non-production code.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// File-name suffix of test files (default: `_test.go`)
    #[serde(default)]
    pub test_suffix: Option<String>,
    /// Regex matched against each comment line (default: the Go generated-code marker)
    #[serde(default)]
    pub generated_pattern: Option<String>,
    /// Keep test files visible (default: false)
    #[serde(default)]
    pub include_test_files: bool,
    /// Keep generated files visible (default: false)
    #[serde(default)]
    pub include_generated: bool,
    /// Glob patterns for paths never loaded at all (e.g., "**/mocks/**")
    #[serde(default)]
    pub excluded_paths: Vec<String>,
}

impl FilterConfig {
    /// Parse a configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::Yaml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Look for a default configuration file in `dir`.
    pub fn discover<P: AsRef<Path>>(dir: P) -> Option<PathBuf> {
        DEFAULT_CONFIG_NAMES
            .iter()
            .map(|name| dir.as_ref().join(name))
            .find(|p| p.is_file())
    }

    /// Load `path` if given, else a discovered file in `dir`, else defaults.
    pub fn load_or_default(path: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        match path.map(Path::to_path_buf).or_else(|| Self::discover(dir)) {
            Some(p) => {
                tracing::debug!(config = %p.display(), "loading filter configuration");
                Self::parse_file(p)
            }
            None => Ok(Self::default()),
        }
    }

    /// Returns the test-file suffix.
    pub fn test_suffix(&self) -> &str {
        self.test_suffix.as_deref().unwrap_or(TEST_FILE_SUFFIX)
    }

    /// Returns the generated-file marker pattern.
    pub fn generated_pattern(&self) -> &str {
        self.generated_pattern.as_deref().unwrap_or(GENERATED_MARKER)
    }

    /// Compile `excluded_paths` into a matcher.
    pub fn excluded_path_matcher(&self) -> Result<GlobSet, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.excluded_paths {
            let glob = Glob::new(pattern).map_err(|e| ConfigError::InvalidGlob {
                glob: pattern.clone(),
                source: e,
            })?;
            builder.add(glob);
        }
        builder.build().map_err(|e| ConfigError::InvalidGlob {
            glob: self.excluded_paths.join(", "),
            source: e,
        })
    }
}
