//! Collecting file contents from disk.
//!
//! A collection root may be a single regular file or a directory. Directories
//! are walked recursively and every regular file found at any depth becomes a
//! [`FileRecord`] keyed by its `/`-separated path relative to the root.
//!
//! # Examples
//!
//! ```no_run
//! use treedump::collect::{collect, CollectConfig};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let files = collect(Path::new("src"), &CollectConfig::default())?;
//! for record in &files {
//!     println!("{}: {} lines", record.relative_path, record.line_count());
//! }
//! # Ok(())
//! # }
//! ```

use crate::error::CollectError;
use crate::filter::FilterConfig;
use crate::tree::{FileRecord, FileSet};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Options controlling the directory walk.
#[derive(Debug, Clone)]
pub struct CollectConfig {
    /// Descend into symlinked directories and read symlinked files.
    /// Symlink loops are detected and skipped.
    pub follow_symlinks: bool,
    /// Collect dot-files and descend into dot-directories
    pub include_hidden: bool,
    /// Relative-path patterns deciding which files are read at all
    pub filter: FilterConfig,
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            include_hidden: true,
            filter: FilterConfig::default(),
        }
    }
}

/// Collects every regular file under `root` into a [`FileSet`].
///
/// If `root` is a regular file, the set holds that single file keyed by its
/// file name. Entries that are neither regular files nor directories are
/// skipped, as are symlinks unless `config.follow_symlinks` is set.
///
/// Files that cannot be read are logged and left out; they never abort the
/// collection.
///
/// # Errors
///
/// Returns `CollectError::NotFound` if `root` does not exist.
pub fn collect(root: &Path, config: &CollectConfig) -> Result<FileSet, CollectError> {
    if !root.exists() {
        return Err(CollectError::not_found(root));
    }

    let set = if root.is_file() {
        let name = root
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| root.to_string_lossy().to_string());
        let records = if config.filter.accepts(&name) {
            read_or_skip(root, &name)
        } else {
            None
        };
        FileSet::from_records(root, records)
    } else if root.is_dir() {
        FileSet::from_records(root, walk_directory(root, config))
    } else {
        warn!(path = %root.display(), "not a regular file or directory, nothing to collect");
        FileSet::from_records(root, Vec::new())
    };

    debug!(
        root = %root.display(),
        files = set.len(),
        lines = set.total_lines(),
        "collection finished"
    );
    Ok(set)
}

/// Reads a single file into a record.
///
/// # Errors
///
/// Returns `CollectError::Read` if the file cannot be opened or read.
pub fn read_record(path: &Path, relative_path: &str) -> Result<FileRecord, CollectError> {
    let bytes = fs::read(path).map_err(|e| CollectError::read(path, e))?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(FileRecord::new(path, relative_path, &text))
}

fn read_or_skip(path: &Path, relative_path: &str) -> Option<FileRecord> {
    match read_record(path, relative_path) {
        Ok(record) => Some(record),
        Err(err) => {
            warn!("skipping file: {}", err);
            None
        }
    }
}

fn walk_directory(root: &Path, config: &CollectConfig) -> Vec<FileRecord> {
    let include_hidden = config.include_hidden;
    let walker = WalkDir::new(root)
        .follow_links(config.follow_symlinks)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| entry.depth() == 0 || include_hidden || !is_hidden(entry));

    let mut records = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                if let Some(ancestor) = err.loop_ancestor() {
                    warn!(
                        path = %path.display(),
                        ancestor = %ancestor.display(),
                        "skipping symlink loop"
                    );
                } else {
                    warn!("skipping entry: {}", CollectError::walk(path, err));
                }
                continue;
            }
        };

        // Directories are descended into by the walker; symlinks (when not
        // followed), sockets, fifos and devices are not collected.
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(relative_path) = relative_key(root, entry.path()) else {
            continue;
        };
        if !config.filter.accepts(&relative_path) {
            debug!(path = %relative_path, "filtered out");
            continue;
        }
        records.extend(read_or_skip(entry.path(), &relative_path));
    }

    records
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// Builds the `/`-separated key for `path` below `root`.
fn relative_key(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let key = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    if key.is_empty() {
        None
    } else {
        Some(key)
    }
}
