//! Error types for collecting trees and writing reports.

use std::io;
use std::path::PathBuf;

/// Failures while gathering files from disk.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("Path not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read file {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to walk {}: {}", .path.display(), .source)]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// A `--ignore`/`--only` pattern that could not be compiled.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("Invalid path pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build path filter: {0}")]
    Build(#[source] globset::Error),
}

/// Failures while producing a report.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Failed to create output file {}: {}", .path.display(), .source)]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write output: {0}")]
    Write(#[from] io::Error),

    #[error("Failed to serialize to JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum TreedumpError {
    #[error(transparent)]
    Collect(#[from] CollectError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("Invalid usage: {0}")]
    Usage(String),
}

impl CollectError {
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn walk(path: impl Into<PathBuf>, source: walkdir::Error) -> Self {
        Self::Walk {
            path: path.into(),
            source,
        }
    }
}

impl FilterError {
    pub fn invalid_pattern(pattern: impl Into<String>, source: globset::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }
}

impl OutputError {
    pub fn create(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Create {
            path: path.into(),
            source,
        }
    }
}

impl TreedumpError {
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }
}
