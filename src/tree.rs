//! In-memory snapshot of a file tree.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One file's contents at collection time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Location on disk (the collection root joined with `relative_path`)
    pub path: PathBuf,
    /// `/`-separated path relative to the collection root
    pub relative_path: String,
    /// Source lines without terminators, in original order
    pub lines: Vec<String>,
    /// `lines` joined with `\n`, kept for cheap equality checks
    pub content: String,
}

impl FileRecord {
    /// Builds a record by splitting `text` on line boundaries (`\n` or `\r\n`).
    ///
    /// A trailing terminator does not produce an extra empty line, so
    /// `"a\nb\n"` and `"a\nb"` both yield two lines.
    pub fn new(path: impl Into<PathBuf>, relative_path: impl Into<String>, text: &str) -> Self {
        Self::from_lines(
            path,
            relative_path,
            text.lines().map(str::to_string).collect(),
        )
    }

    pub fn from_lines(
        path: impl Into<PathBuf>,
        relative_path: impl Into<String>,
        lines: Vec<String>,
    ) -> Self {
        let content = lines.join("\n");
        Self {
            path: path.into(),
            relative_path: relative_path.into(),
            lines,
            content,
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns true if both records hold the same text, ignoring location.
    pub fn same_content(&self, other: &FileRecord) -> bool {
        self.content == other.content
    }
}

/// A set of file records keyed by relative path.
///
/// Iteration is always in lexicographic order of the relative path, which
/// keeps every report independent of filesystem enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    root: PathBuf,
    records: BTreeMap<String, FileRecord>,
}

impl FileSet {
    /// Builds a set from already collected records. Later records replace
    /// earlier ones with the same relative path.
    pub fn from_records(
        root: impl Into<PathBuf>,
        records: impl IntoIterator<Item = FileRecord>,
    ) -> Self {
        let records = records
            .into_iter()
            .map(|record| (record.relative_path.clone(), record))
            .collect();
        Self {
            root: root.into(),
            records,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, relative_path: &str) -> Option<&FileRecord> {
        self.records.get(relative_path)
    }

    pub fn contains(&self, relative_path: &str) -> bool {
        self.records.contains_key(relative_path)
    }

    pub fn iter(&self) -> btree_map::Values<'_, String, FileRecord> {
        self.records.values()
    }

    pub fn relative_paths(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Records with at least one line, as shown by the dump formats.
    pub fn non_empty_records(&self) -> impl Iterator<Item = &FileRecord> {
        self.records.values().filter(|record| !record.is_empty())
    }

    pub fn total_lines(&self) -> usize {
        self.records.values().map(FileRecord::line_count).sum()
    }

    pub(crate) fn into_records(self) -> BTreeMap<String, FileRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a FileSet {
    type Item = &'a FileRecord;
    type IntoIter = btree_map::Values<'a, String, FileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_splits_lines() {
        let record = FileRecord::new("root/a.txt", "a.txt", "one\ntwo\r\nthree\n");
        assert_eq!(record.lines, vec!["one", "two", "three"]);
        assert_eq!(record.line_count(), 3);
        assert_eq!(record.content, "one\ntwo\nthree");
    }

    #[test]
    fn test_record_empty_text() {
        let record = FileRecord::new("root/empty", "empty", "");
        assert!(record.is_empty());
        assert_eq!(record.line_count(), 0);
        assert_eq!(record.content, "");
    }

    #[test]
    fn test_same_content_ignores_location() {
        let a = FileRecord::new("left/x", "x", "1\n2\n");
        let b = FileRecord::new("right/x", "x", "1\n2");
        assert!(a.same_content(&b));
    }

    #[test]
    fn test_fileset_iterates_in_path_order() {
        let set = FileSet::from_records(
            "root",
            vec![
                FileRecord::new("root/b", "b", "x"),
                FileRecord::new("root/a/z", "a/z", "x"),
                FileRecord::new("root/a", "a", "x"),
            ],
        );
        let paths: Vec<&str> = set.relative_paths().collect();
        assert_eq!(paths, vec!["a", "a/z", "b"]);
    }

    #[test]
    fn test_non_empty_records_skips_empty_files() {
        let set = FileSet::from_records(
            "root",
            vec![
                FileRecord::new("root/empty", "empty", ""),
                FileRecord::new("root/full", "full", "line"),
            ],
        );
        assert_eq!(set.len(), 2);
        let shown: Vec<&str> = set
            .non_empty_records()
            .map(|r| r.relative_path.as_str())
            .collect();
        assert_eq!(shown, vec!["full"]);
    }
}
