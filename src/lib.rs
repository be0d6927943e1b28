//! treedump - dump file trees to text and compare two trees line by line.
//!
//! This library collects the contents of a file or directory tree into memory,
//! renders it as a single text document, and compares two collected trees,
//! classifying every path as added, removed, modified or unchanged with a
//! line-level diff for modified files.
//!
//! # Example
//!
//! ```no_run
//! use treedump::{collect, reconcile, format_comparison, CollectConfig, CompareFormat, OutputOptions};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Collect both trees
//! let config = CollectConfig::default();
//! let old = collect(Path::new("release-1.0"), &config)?;
//! let new = collect(Path::new("release-1.1"), &config)?;
//!
//! // Classify every path
//! let result = reconcile(old, new);
//!
//! // Render a unified-diff-style report
//! let output = format_comparison(&result, CompareFormat::Diff, &OutputOptions::default())?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod collect;
pub mod diff;
pub mod error;
pub mod filter;
pub mod output;
pub mod reconcile;
pub mod tree;

// Re-export commonly used types for convenience
pub use collect::{collect, read_record, CollectConfig};
pub use diff::{apply_hunks, diff_lines, Hunk, LineStats};
pub use error::{CollectError, FilterError, OutputError, TreedumpError};
pub use filter::{FilterBuilder, FilterConfig, PathPattern};
pub use output::{
    format_comparison, format_files, write_comparison, write_files, CompareFormat, DumpFormat,
    OutputOptions,
};
pub use reconcile::{reconcile, FileChange, ReconcileStats, ReconciliationResult};
pub use tree::{FileRecord, FileSet};
