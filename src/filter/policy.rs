//! Deciding whether a source file is production code.

use std::fmt;

use regex::Regex;

use crate::ast::{Node, PositionResolver};
use crate::config::{ConfigError, FilterConfig};

/// Suffix of Go test files.
pub const TEST_FILE_SUFFIX: &str = "_test.go";

/// Marker line of generated Go files.
///
/// See <https://github.com/golang/go/issues/13560#issuecomment-288457920>.
pub const GENERATED_MARKER: &str = r"^// Code generated .* DO NOT EDIT\.$";

lazy_static::lazy_static! {
    static ref GENERATED_MARKER_RE: Regex = Regex::new(GENERATED_MARKER).unwrap();
}

/// Why a source file was excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    /// The file name ends with the test suffix.
    TestFile,
    /// A comment line matches the generated-code marker.
    Generated,
}

impl Exclusion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Exclusion::TestFile => "test file",
            Exclusion::Generated => "generated",
        }
    }
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stateless predicate over source-file nodes.
///
/// A file is excluded when its name ends with the test suffix or when any of
/// its comment lines matches the generated marker. Either rule can be turned
/// off through [`FilterConfig`].
#[derive(Debug, Clone)]
pub struct ExclusionPolicy {
    test_suffix: Option<String>,
    generated: Option<Regex>,
}

impl Default for ExclusionPolicy {
    fn default() -> Self {
        Self {
            test_suffix: Some(TEST_FILE_SUFFIX.to_string()),
            generated: Some(GENERATED_MARKER_RE.clone()),
        }
    }
}

impl ExclusionPolicy {
    /// Build a policy from configuration.
    pub fn from_config(config: &FilterConfig) -> Result<Self, ConfigError> {
        let test_suffix = (!config.include_test_files).then(|| config.test_suffix().to_string());
        let generated = if config.include_generated {
            None
        } else {
            let pattern = config.generated_pattern();
            let regex = Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                source: e,
            })?;
            Some(regex)
        };
        Ok(Self {
            test_suffix,
            generated,
        })
    }

    /// A policy that never excludes anything.
    pub fn none() -> Self {
        Self {
            test_suffix: None,
            generated: None,
        }
    }

    /// Whether `unit` (a source-file node) and its whole subtree are hidden.
    pub fn excluded(&self, unit: &Node, resolver: &dyn PositionResolver) -> bool {
        self.exclusion(unit, resolver).is_some()
    }

    /// The reason `unit` is hidden, if it is.
    ///
    /// An unresolved position only disables the file-name rule; the marker
    /// rule reads the node's own comments.
    pub fn exclusion(&self, unit: &Node, resolver: &dyn PositionResolver) -> Option<Exclusion> {
        let name = resolver.file(unit.pos).map(|f| f.name());
        self.exclusion_for(unit, name)
    }

    /// [`excluded`](Self::excluded), logging the decision.
    pub(crate) fn check(&self, unit: &Node, resolver: &dyn PositionResolver) -> bool {
        let name = resolver.file(unit.pos).map(|f| f.name());
        let Some(reason) = self.exclusion_for(unit, name) else {
            return false;
        };
        tracing::debug!(
            file = name.unwrap_or("<unknown>"),
            reason = %reason,
            "skipping source file"
        );
        true
    }

    fn exclusion_for(&self, unit: &Node, name: Option<&str>) -> Option<Exclusion> {
        if name.is_some_and(|n| self.is_test_file(n)) {
            return Some(Exclusion::TestFile);
        }
        if self.is_generated(unit) {
            return Some(Exclusion::Generated);
        }
        None
    }

    /// Exact, case-sensitive suffix check on a file name.
    pub fn is_test_file(&self, name: &str) -> bool {
        self.test_suffix
            .as_deref()
            .is_some_and(|suffix| name.ends_with(suffix))
    }

    /// Whether any comment line of `unit` carries the generated marker.
    pub fn is_generated(&self, unit: &Node) -> bool {
        let Some(re) = &self.generated else {
            return false;
        };
        unit.comment_lines().any(|c| re.is_match(&c.text))
    }
}
