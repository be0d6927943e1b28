//! Comparing two file trees.
//!
//! Every relative path found on either side is classified exactly once as
//! only-left, only-right, modified or unchanged. Paths present on both sides
//! are first compared by their joined content and only run through the line
//! differ when that check fails.
//!
//! # Examples
//!
//! ```
//! use treedump::reconcile::reconcile;
//! use treedump::tree::{FileRecord, FileSet};
//!
//! let left = FileSet::from_records("old", vec![
//!     FileRecord::new("old/x.txt", "x.txt", "1\n2\n"),
//!     FileRecord::new("old/y.txt", "y.txt", "same\n"),
//! ]);
//! let right = FileSet::from_records("new", vec![
//!     FileRecord::new("new/x.txt", "x.txt", "1\n3\n"),
//!     FileRecord::new("new/z.txt", "z.txt", "new\n"),
//! ]);
//!
//! let result = reconcile(left, right);
//!
//! assert_eq!(result.stats.only_left, 1);
//! assert_eq!(result.stats.only_right, 1);
//! assert_eq!(result.stats.modified, 1);
//! assert_eq!(result.stats.unchanged, 0);
//! ```

use crate::diff::{diff_lines, Hunk};
use crate::tree::{FileRecord, FileSet};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;

/// How a single relative path compares between the two trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    /// Path exists only in the left tree
    OnlyLeft(FileRecord),
    /// Path exists only in the right tree
    OnlyRight(FileRecord),
    /// Path exists in both trees with different content
    Modified {
        left_line_count: usize,
        right_line_count: usize,
        hunks: Vec<Hunk>,
    },
    /// Path exists in both trees with the same content
    Unchanged { line_count: usize },
}

impl FileChange {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, FileChange::Unchanged { .. })
    }

    /// The hunks a diff report shows for this path.
    ///
    /// Paths present on one side only get a single hunk spanning the whole
    /// file. Unchanged paths have none.
    pub fn hunks(&self) -> Vec<Hunk> {
        match self {
            FileChange::OnlyLeft(record) => vec![Hunk::synthetic_removal(&record.lines)],
            FileChange::OnlyRight(record) => vec![Hunk::synthetic_addition(&record.lines)],
            FileChange::Modified { hunks, .. } => hunks.clone(),
            FileChange::Unchanged { .. } => Vec::new(),
        }
    }
}

/// Per-category path counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub only_left: usize,
    pub only_right: usize,
    pub modified: usize,
    pub unchanged: usize,
}

impl ReconcileStats {
    /// Number of paths that differ in any way.
    pub fn total_changes(&self) -> usize {
        self.only_left + self.only_right + self.modified
    }

    pub fn total_paths(&self) -> usize {
        self.total_changes() + self.unchanged
    }

    fn record(&mut self, change: &FileChange) {
        match change {
            FileChange::OnlyLeft(_) => self.only_left += 1,
            FileChange::OnlyRight(_) => self.only_right += 1,
            FileChange::Modified { .. } => self.modified += 1,
            FileChange::Unchanged { .. } => self.unchanged += 1,
        }
    }
}

/// The classification of every path in two trees.
#[derive(Debug, Clone)]
pub struct ReconciliationResult {
    pub left_root: PathBuf,
    pub right_root: PathBuf,
    /// One entry per relative path, ordered lexicographically
    pub entries: BTreeMap<String, FileChange>,
    pub stats: ReconcileStats,
}

impl ReconciliationResult {
    /// Returns true if the trees hold the same paths with the same content.
    pub fn is_identical(&self) -> bool {
        self.stats.total_changes() == 0
    }

    pub fn only_left(&self) -> impl Iterator<Item = (&str, &FileRecord)> {
        self.entries.iter().filter_map(|(path, change)| match change {
            FileChange::OnlyLeft(record) => Some((path.as_str(), record)),
            _ => None,
        })
    }

    pub fn only_right(&self) -> impl Iterator<Item = (&str, &FileRecord)> {
        self.entries.iter().filter_map(|(path, change)| match change {
            FileChange::OnlyRight(record) => Some((path.as_str(), record)),
            _ => None,
        })
    }

    /// Modified paths with their left and right line counts and hunks.
    pub fn modified(&self) -> impl Iterator<Item = (&str, usize, usize, &[Hunk])> {
        self.entries.iter().filter_map(|(path, change)| match change {
            FileChange::Modified {
                left_line_count,
                right_line_count,
                hunks,
            } => Some((
                path.as_str(),
                *left_line_count,
                *right_line_count,
                hunks.as_slice(),
            )),
            _ => None,
        })
    }

    pub fn unchanged(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().filter_map(|(path, change)| match change {
            FileChange::Unchanged { line_count } => Some((path.as_str(), *line_count)),
            _ => None,
        })
    }

    /// Every path that differs, in lexicographic order.
    pub fn changes(&self) -> impl Iterator<Item = (&str, &FileChange)> {
        self.entries
            .iter()
            .filter(|(_, change)| !change.is_unchanged())
            .map(|(path, change)| (path.as_str(), change))
    }
}

/// Classifies every path of `left` and `right`.
///
/// Both sets are consumed; records of one-sided paths move into the result.
pub fn reconcile(left: FileSet, right: FileSet) -> ReconciliationResult {
    let left_root = left.root().to_path_buf();
    let right_root = right.root().to_path_buf();

    let mut right_records = right.into_records();
    let mut entries = BTreeMap::new();

    for (path, left_record) in left.into_records() {
        let change = match right_records.remove(&path) {
            None => FileChange::OnlyLeft(left_record),
            Some(right_record) => compare_records(&left_record, &right_record),
        };
        entries.insert(path, change);
    }

    // Whatever is left on the right side was never seen on the left
    for (path, right_record) in right_records {
        entries.insert(path, FileChange::OnlyRight(right_record));
    }

    let mut stats = ReconcileStats::default();
    for change in entries.values() {
        stats.record(change);
    }

    debug!(
        left = %left_root.display(),
        right = %right_root.display(),
        only_left = stats.only_left,
        only_right = stats.only_right,
        modified = stats.modified,
        unchanged = stats.unchanged,
        "reconciled trees"
    );

    ReconciliationResult {
        left_root,
        right_root,
        entries,
        stats,
    }
}

fn compare_records(left: &FileRecord, right: &FileRecord) -> FileChange {
    if left.same_content(right) {
        return FileChange::Unchanged {
            line_count: left.line_count(),
        };
    }

    FileChange::Modified {
        left_line_count: left.line_count(),
        right_line_count: right.line_count(),
        hunks: diff_lines(&left.lines, &right.lines),
    }
}
