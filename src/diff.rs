//! Line-based diff between two versions of a file.
//!
//! The differ walks both line sequences with a pair of cursors and never
//! looks ahead. A hunk opens at the first mismatch and closes as soon as both
//! sides agree on a line again. Within a mismatch step a removed line and an
//! added line may both be consumed, so an edited line shows up as a paired
//! replacement rather than a separate deletion and insertion.
//!
//! This is deliberately not a minimal edit script: inserting a block in the
//! middle of a file usually yields one hunk that removes and re-adds the tail
//! until the two sides happen to resynchronise. Reports built on top of it
//! depend on these exact hunk shapes.
//!
//! # Examples
//!
//! ```
//! use treedump::diff::diff_lines;
//!
//! let hunks = diff_lines(&["a", "b", "c"], &["a", "x", "c"]);
//!
//! assert_eq!(hunks.len(), 1);
//! assert_eq!(hunks[0].left_start, 2);
//! assert_eq!(hunks[0].removed, vec!["b"]);
//! assert_eq!(hunks[0].added, vec!["x"]);
//! ```

use serde::Serialize;

/// A contiguous region where two line sequences diverge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hunk {
    /// 1-based line in the left sequence where the region starts
    pub left_start: usize,
    /// 1-based line in the right sequence where the region starts
    pub right_start: usize,
    /// Lines present only on the left side, in order
    pub removed: Vec<String>,
    /// Lines present only on the right side, in order
    pub added: Vec<String>,
}

impl Hunk {
    fn open(left_start: usize, right_start: usize) -> Self {
        Self {
            left_start,
            right_start,
            removed: Vec::new(),
            added: Vec::new(),
        }
    }

    /// A hunk removing a whole file, used when a path exists only on the left.
    pub fn synthetic_removal(lines: &[String]) -> Self {
        Self {
            left_start: 1,
            right_start: 0,
            removed: lines.to_vec(),
            added: Vec::new(),
        }
    }

    /// A hunk adding a whole file, used when a path exists only on the right.
    pub fn synthetic_addition(lines: &[String]) -> Self {
        Self {
            left_start: 0,
            right_start: 1,
            removed: Vec::new(),
            added: lines.to_vec(),
        }
    }
}

/// Totals of removed and added lines across a set of hunks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LineStats {
    pub removed: usize,
    pub added: usize,
}

impl LineStats {
    pub fn from_hunks(hunks: &[Hunk]) -> Self {
        hunks.iter().fold(Self::default(), |stats, hunk| Self {
            removed: stats.removed + hunk.removed.len(),
            added: stats.added + hunk.added.len(),
        })
    }
}

/// Computes the hunks that turn `left` into `right`.
///
/// Runs in O(n + m): every step advances at least one cursor.
///
/// # Examples
///
/// ```
/// use treedump::diff::diff_lines;
///
/// let hunks = diff_lines(&["a", "b"], &["a", "b", "c"]);
///
/// assert_eq!(hunks.len(), 1);
/// assert_eq!((hunks[0].left_start, hunks[0].right_start), (3, 3));
/// assert!(hunks[0].removed.is_empty());
/// assert_eq!(hunks[0].added, vec!["c"]);
/// ```
pub fn diff_lines<L, R>(left: &[L], right: &[R]) -> Vec<Hunk>
where
    L: AsRef<str>,
    R: AsRef<str>,
{
    let mut hunks = Vec::new();
    let mut current: Option<Hunk> = None;
    let (mut i, mut j) = (0, 0);

    while i < left.len() || j < right.len() {
        if i < left.len() && j < right.len() && left[i].as_ref() == right[j].as_ref() {
            // Resynchronised; the matching line belongs to neither hunk side
            if let Some(hunk) = current.take() {
                hunks.push(hunk);
            }
            i += 1;
            j += 1;
            continue;
        }

        let hunk = current.get_or_insert_with(|| Hunk::open(i + 1, j + 1));

        if i < left.len() && (j >= right.len() || left[i].as_ref() != right[j].as_ref()) {
            hunk.removed.push(left[i].as_ref().to_string());
            i += 1;
        }

        // Re-checked against the advanced left cursor.
        if j < right.len() && (i >= left.len() || left[i].as_ref() != right[j].as_ref()) {
            hunk.added.push(right[j].as_ref().to_string());
            j += 1;
        }
    }

    if let Some(hunk) = current {
        hunks.push(hunk);
    }

    hunks
}

/// Replays `hunks` against `left`, producing the right-hand sequence.
///
/// Each hunk drops its removed lines at `left_start` and inserts its added
/// lines in their place. Hunks must be in the order [`diff_lines`] returns
/// them.
///
/// # Examples
///
/// ```
/// use treedump::diff::{apply_hunks, diff_lines};
///
/// let left = ["one", "two", "three"];
/// let right = ["one", "2", "three", "four"];
/// let hunks = diff_lines(&left, &right);
///
/// assert_eq!(apply_hunks(&left, &hunks), right);
/// ```
pub fn apply_hunks<S: AsRef<str>>(left: &[S], hunks: &[Hunk]) -> Vec<String> {
    let mut result = Vec::with_capacity(left.len());
    let mut cursor = 0;

    for hunk in hunks {
        let start = hunk.left_start.saturating_sub(1).min(left.len());
        if start > cursor {
            result.extend(left[cursor..start].iter().map(|l| l.as_ref().to_string()));
        }
        result.extend(hunk.added.iter().cloned());
        cursor = cursor.max(start + hunk.removed.len()).min(left.len());
    }

    result.extend(left[cursor..].iter().map(|l| l.as_ref().to_string()));
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    #[test]
    fn test_identical_sequences_have_no_hunks() {
        let l = lines("a\nb\nc");
        assert!(diff_lines(&l, &l).is_empty());
    }

    #[test]
    fn test_both_empty() {
        let empty: Vec<String> = Vec::new();
        assert!(diff_lines(&empty, &empty).is_empty());
    }

    #[test]
    fn test_single_replacement() {
        let hunks = diff_lines(&["a", "b", "c"], &["a", "x", "c"]);
        assert_eq!(
            hunks,
            vec![Hunk {
                left_start: 2,
                right_start: 2,
                removed: vec!["b".to_string()],
                added: vec!["x".to_string()],
            }]
        );
    }

    #[test]
    fn test_append_at_end() {
        let hunks = diff_lines(&["a", "b"], &["a", "b", "c"]);
        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].left_start, 3);
        assert_eq!(hunks[0].right_start, 3);
        assert!(hunks[0].removed.is_empty());
        assert_eq!(hunks[0].added, vec!["c"]);
    }

    #[test]
    fn test_truncate_at_end() {
        let hunks = diff_lines(&["a", "b", "c"], &["a"]);
        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].left_start, 2);
        assert_eq!(hunks[0].removed, vec!["b", "c"]);
        assert!(hunks[0].added.is_empty());
    }

    #[test]
    fn test_deletion_resyncs_when_next_left_line_matches() {
        // After "b" is consumed, left[2] == right[1], so nothing is added.
        let hunks = diff_lines(&["a", "b", "c"], &["a", "c"]);
        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].removed, vec!["b"]);
        assert!(hunks[0].added.is_empty());
    }

    #[test]
    fn test_insertion_in_middle_is_not_minimal() {
        // No lookahead: the inserted line is paired with "b" and the tail
        // shifts until the sides line up again.
        let hunks = diff_lines(&["a", "b", "c"], &["a", "new", "b", "c"]);
        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].left_start, 2);
        assert_eq!(hunks[0].right_start, 2);
        assert_eq!(hunks[0].removed, vec!["b", "c"]);
        assert_eq!(hunks[0].added, vec!["new", "b", "c"]);
    }

    #[test]
    fn test_multiple_hunks_in_order() {
        let hunks = diff_lines(&["a", "b", "c", "d", "e"], &["A", "b", "c", "D", "e"]);
        assert_eq!(hunks.len(), 2);
        assert_eq!((hunks[0].left_start, hunks[0].right_start), (1, 1));
        assert_eq!((hunks[1].left_start, hunks[1].right_start), (4, 4));
    }

    #[test]
    fn test_apply_hunks_reconstructs_right() {
        let cases: Vec<(&str, &str)> = vec![
            ("a\nb\nc", "a\nx\nc"),
            ("a\nb", "a\nb\nc"),
            ("a\nb\nc", "a\nnew\nb\nc"),
            ("", "x\ny"),
            ("x\ny", ""),
            ("1\n2\n3\n4\n5", "5\n4\n3\n2\n1"),
            ("same\nsame\nsame", "same\nother\nsame\nsame"),
        ];
        for (l, r) in cases {
            let (l, r) = (lines(l), lines(r));
            let hunks = diff_lines(&l, &r);
            assert_eq!(apply_hunks(&l, &hunks), r, "left={:?} right={:?}", l, r);
        }
    }

    #[test]
    fn test_synthetic_hunks() {
        let file = lines("x\ny");
        let removal = Hunk::synthetic_removal(&file);
        assert_eq!((removal.left_start, removal.right_start), (1, 0));
        assert_eq!(removal.removed, file);

        let addition = Hunk::synthetic_addition(&file);
        assert_eq!((addition.left_start, addition.right_start), (0, 1));
        assert_eq!(apply_hunks(&Vec::<String>::new(), &[addition]), file);
    }

    #[test]
    fn test_whole_file_hunks_for_empty_files_keep_line_one() {
        let empty: Vec<String> = Vec::new();

        let removal = Hunk::synthetic_removal(&empty);
        assert_eq!((removal.left_start, removal.right_start), (1, 0));
        assert!(apply_hunks(&empty, &[removal]).is_empty());

        let addition = Hunk::synthetic_addition(&empty);
        assert_eq!((addition.left_start, addition.right_start), (0, 1));
        assert!(apply_hunks(&empty, &[addition]).is_empty());
    }

    #[test]
    fn test_line_stats() {
        let hunks = diff_lines(&["a", "b", "c"], &["a", "x", "y", "c"]);
        let stats = LineStats::from_hunks(&hunks);
        assert_eq!(stats, LineStats { removed: 2, added: 3 });
    }
}
