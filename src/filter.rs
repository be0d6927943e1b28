//! Include/exclude patterns over relative file paths.
//!
//! Patterns are globs matched against `/`-separated paths relative to the
//! collection root. `*` never crosses a `/`, `**` spans any number of
//! directories, and `?`, `[abc]` and `{a,b}` work as usual.
//!
//! ```
//! use treedump::filter::{FilterConfig, PathPattern};
//!
//! let docs = PathPattern::parse("docs/*.md").unwrap();
//! assert!(docs.matches("docs/readme.md"));
//! assert!(!docs.matches("docs/api/index.md"));
//!
//! let scratch = PathPattern::parse("**/*.tmp").unwrap();
//! assert!(scratch.matches("scratch.tmp"));
//! assert!(scratch.matches("a/b/c/scratch.tmp"));
//!
//! let filter = FilterConfig::builder().ignore("target/**").build().unwrap();
//! assert!(!filter.accepts("target/debug/build.log"));
//! assert!(filter.accepts("src/lib.rs"));
//! ```

use crate::error::FilterError;
use globset::{Glob, GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};
use std::fmt;

fn compile(pattern: &str) -> Result<Glob, FilterError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|source| FilterError::invalid_pattern(pattern, source))
}

/// A single compiled glob.
#[derive(Debug, Clone)]
pub struct PathPattern {
    glob: Glob,
    matcher: GlobMatcher,
}

impl PathPattern {
    /// # Errors
    ///
    /// Returns `FilterError::InvalidPattern` for malformed globs such as
    /// an unclosed `[` or `{`.
    pub fn parse(pattern: &str) -> Result<Self, FilterError> {
        let glob = compile(pattern)?;
        let matcher = glob.compile_matcher();
        Ok(Self { glob, matcher })
    }

    pub fn as_str(&self) -> &str {
        self.glob.glob()
    }

    pub fn matches(&self, relative_path: &str) -> bool {
        self.matcher.is_match(relative_path)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pattern lists gathered from the command line, compiled by [`build`].
///
/// [`build`]: FilterBuilder::build
#[derive(Debug, Clone, Default)]
pub struct FilterBuilder {
    ignore: Vec<String>,
    only: Vec<String>,
}

impl FilterBuilder {
    /// Adds a pattern for paths to leave out.
    pub fn ignore(mut self, pattern: impl Into<String>) -> Self {
        self.ignore.push(pattern.into());
        self
    }

    /// Adds a pattern for paths to keep; once any is set, unmatched paths are
    /// left out.
    pub fn only(mut self, pattern: impl Into<String>) -> Self {
        self.only.push(pattern.into());
        self
    }

    /// Compiles every pattern. Blank patterns are skipped.
    pub fn build(&self) -> Result<FilterConfig, FilterError> {
        Ok(FilterConfig {
            ignored: build_set(&self.ignore)?,
            only: build_set(&self.only)?,
        })
    }
}

fn build_set(patterns: &[String]) -> Result<Option<GlobSet>, FilterError> {
    let mut builder = GlobSetBuilder::new();
    let mut added = false;
    for pattern in patterns.iter().filter(|p| !p.trim().is_empty()) {
        builder.add(compile(pattern)?);
        added = true;
    }
    if !added {
        return Ok(None);
    }
    builder.build().map(Some).map_err(FilterError::Build)
}

/// Decides which relative paths are collected.
///
/// A path is rejected if any ignore pattern matches it. Otherwise it is
/// accepted when no `only` patterns are configured or at least one matches.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    ignored: Option<GlobSet>,
    only: Option<GlobSet>,
}

impl FilterConfig {
    /// A filter that accepts every path.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> FilterBuilder {
        FilterBuilder::default()
    }

    pub fn is_empty(&self) -> bool {
        self.ignored.is_none() && self.only.is_none()
    }

    pub fn accepts(&self, relative_path: &str) -> bool {
        if let Some(ignored) = &self.ignored {
            if ignored.is_match(relative_path) {
                return false;
            }
        }
        self.only
            .as_ref()
            .map_or(true, |only| only.is_match(relative_path))
    }
}
