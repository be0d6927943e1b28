//! Rendering collected files and tree comparisons.
//!
//! Single-path mode renders a [`FileSet`] as a full content dump, a grep-style
//! summary or JSON. Compare mode renders a [`ReconciliationResult`] as a
//! simple summary, a unified-diff-style report or JSON. Every renderer writes
//! into any [`Write`] sink; the `format_*` helpers collect into a `String`.
//!
//! # Examples
//!
//! ```
//! use treedump::output::{format_files, DumpFormat, OutputOptions};
//! use treedump::tree::{FileRecord, FileSet};
//!
//! let files = FileSet::from_records("src", vec![FileRecord::new("src/a.txt", "a.txt", "x\ny\nz\n")]);
//! let output = format_files(&files, DumpFormat::Grep, &OutputOptions::default()).unwrap();
//!
//! assert_eq!(output, "src/a.txt:3\n");
//! ```

use crate::diff::{Hunk, LineStats};
use crate::error::OutputError;
use crate::reconcile::{FileChange, ReconciliationResult};
use crate::tree::{FileRecord, FileSet};
use colored::*;
use serde_json::json;
use std::io::Write;
use std::path::Path;

/// Renderings of a single collected tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpFormat {
    /// Header plus every line of every non-empty file
    Full,
    /// One `path:lines` entry per non-empty file
    Grep,
    /// JSON document with every file
    Json,
}

/// Renderings of a tree comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareFormat {
    /// Plain listing of added, removed and modified paths
    Simple,
    /// Unified-diff-style report with hunks
    Diff,
    /// JSON document with changes and statistics
    Json,
}

/// Options shared by all renderers.
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    /// Append file contents to grep-style entries
    pub show_content: bool,
    /// Colour diff-style output with ANSI escape codes
    pub color: bool,
}

/// Writes `files` to `out` in the requested format.
///
/// Files with no lines are left out of the text formats.
pub fn write_files<W: Write + ?Sized>(
    files: &FileSet,
    format: DumpFormat,
    options: &OutputOptions,
    out: &mut W,
) -> Result<(), OutputError> {
    match format {
        DumpFormat::Full => write_full(files, out),
        DumpFormat::Grep => write_grep(files, options.show_content, out),
        DumpFormat::Json => write_json_value(&files_to_json(files), out),
    }
}

/// Writes a tree comparison to `out` in the requested format.
pub fn write_comparison<W: Write + ?Sized>(
    result: &ReconciliationResult,
    format: CompareFormat,
    options: &OutputOptions,
    out: &mut W,
) -> Result<(), OutputError> {
    match format {
        CompareFormat::Simple => write_simple(result, out),
        CompareFormat::Diff => write_unified(result, options.color, out),
        CompareFormat::Json => write_json_value(&comparison_to_json(result), out),
    }
}

/// Renders `files` into a string.
pub fn format_files(
    files: &FileSet,
    format: DumpFormat,
    options: &OutputOptions,
) -> Result<String, OutputError> {
    let mut buffer = Vec::new();
    write_files(files, format, options, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Renders a tree comparison into a string.
pub fn format_comparison(
    result: &ReconciliationResult,
    format: CompareFormat,
    options: &OutputOptions,
) -> Result<String, OutputError> {
    let mut buffer = Vec::new();
    write_comparison(result, format, options, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn write_full<W: Write + ?Sized>(files: &FileSet, out: &mut W) -> Result<(), OutputError> {
    for record in files.non_empty_records() {
        writeln!(
            out,
            "Contents of {} ({} lines):",
            record.path.display(),
            record.line_count()
        )?;
        write_lines(&record.lines, out)?;
        writeln!(out)?;
    }
    Ok(())
}

fn write_grep<W: Write + ?Sized>(
    files: &FileSet,
    show_content: bool,
    out: &mut W,
) -> Result<(), OutputError> {
    for record in files.non_empty_records() {
        if show_content {
            writeln!(out, "{}:{}:", record.path.display(), record.line_count())?;
            write_lines(&record.lines, out)?;
            writeln!(out)?;
        } else {
            writeln!(out, "{}:{}", record.path.display(), record.line_count())?;
        }
    }
    Ok(())
}

fn write_lines<W: Write + ?Sized>(lines: &[String], out: &mut W) -> Result<(), OutputError> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

fn write_simple<W: Write + ?Sized>(
    result: &ReconciliationResult,
    out: &mut W,
) -> Result<(), OutputError> {
    let left = result.left_root.display();
    let right = result.right_root.display();

    writeln!(out, "Comparing {} and {}", left, right)?;

    if result.is_identical() {
        writeln!(out)?;
        writeln!(out, "No differences found.")?;
    }

    let only_left: Vec<&str> = result.only_left().map(|(path, _)| path).collect();
    if !only_left.is_empty() {
        writeln!(out)?;
        writeln!(out, "Only in {}:", left)?;
        for path in only_left {
            writeln!(out, "  {}", path)?;
        }
    }

    let only_right: Vec<&str> = result.only_right().map(|(path, _)| path).collect();
    if !only_right.is_empty() {
        writeln!(out)?;
        writeln!(out, "Only in {}:", right)?;
        for path in only_right {
            writeln!(out, "  {}", path)?;
        }
    }

    let mut modified = result.modified().peekable();
    if modified.peek().is_some() {
        writeln!(out)?;
        writeln!(out, "Modified:")?;
        for (path, left_lines, right_lines, _) in modified {
            writeln!(out, "  {} ({} lines -> {} lines)", path, left_lines, right_lines)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "{}", format_summary(result))?;
    Ok(())
}

/// Which side of a comparison a path is missing from, if any.
enum Presence {
    Both,
    LeftOnly,
    RightOnly,
}

fn write_unified<W: Write + ?Sized>(
    result: &ReconciliationResult,
    color: bool,
    out: &mut W,
) -> Result<(), OutputError> {
    for (path, change) in result.changes() {
        let presence = match change {
            FileChange::OnlyLeft(_) => Presence::LeftOnly,
            FileChange::OnlyRight(_) => Presence::RightOnly,
            _ => Presence::Both,
        };
        write_file_header(path, presence, color, out)?;

        match change {
            FileChange::OnlyLeft(record) => write_whole_file_hunk(record, true, color, out)?,
            FileChange::OnlyRight(record) => write_whole_file_hunk(record, false, color, out)?,
            FileChange::Modified { hunks, .. } => {
                for hunk in hunks {
                    let header = format!("@@ -{} +{} @@", hunk.left_start, hunk.right_start);
                    writeln!(out, "{}", paint_hunk_header(&header, color))?;
                    write_hunk_body(hunk, color, out)?;
                }
            }
            FileChange::Unchanged { .. } => {}
        }
    }

    let mut unchanged = result.unchanged().peekable();
    if unchanged.peek().is_some() {
        writeln!(out)?;
        writeln!(out, "Unchanged files:")?;
        for (path, line_count) in unchanged {
            writeln!(out, "  {} ({} lines)", path, line_count)?;
        }
    }

    Ok(())
}

fn write_file_header<W: Write + ?Sized>(
    path: &str,
    presence: Presence,
    color: bool,
    out: &mut W,
) -> Result<(), OutputError> {
    let old = match presence {
        Presence::RightOnly => "/dev/null".to_string(),
        _ => format!("a/{}", path),
    };
    let new = match presence {
        Presence::LeftOnly => "/dev/null".to_string(),
        _ => format!("b/{}", path),
    };

    let lines = [
        format!("diff --git a/{} b/{}", path, path),
        format!("--- {}", old),
        format!("+++ {}", new),
    ];
    for line in lines {
        if color {
            writeln!(out, "{}", line.bold())?;
        } else {
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}

/// Emits the single hunk covering a file present on one side only.
fn write_whole_file_hunk<W: Write + ?Sized>(
    record: &FileRecord,
    removed: bool,
    color: bool,
    out: &mut W,
) -> Result<(), OutputError> {
    let (hunk, header) = if removed {
        let hunk = Hunk::synthetic_removal(&record.lines);
        let header = format!("@@ -{},{} +0,0 @@", hunk.left_start, record.line_count());
        (hunk, header)
    } else {
        let hunk = Hunk::synthetic_addition(&record.lines);
        let header = format!("@@ -0,0 +{},{} @@", hunk.right_start, record.line_count());
        (hunk, header)
    };
    writeln!(out, "{}", paint_hunk_header(&header, color))?;
    write_hunk_body(&hunk, color, out)
}

fn write_hunk_body<W: Write + ?Sized>(
    hunk: &Hunk,
    color: bool,
    out: &mut W,
) -> Result<(), OutputError> {
    for line in &hunk.removed {
        let line = format!("-{}", line);
        if color {
            writeln!(out, "{}", line.red())?;
        } else {
            writeln!(out, "{}", line)?;
        }
    }
    for line in &hunk.added {
        let line = format!("+{}", line);
        if color {
            writeln!(out, "{}", line.green())?;
        } else {
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}

fn paint_hunk_header(header: &str, color: bool) -> String {
    if color {
        header.cyan().to_string()
    } else {
        header.to_string()
    }
}

/// Formats the one-line summary of a comparison.
fn format_summary(result: &ReconciliationResult) -> String {
    let stats = &result.stats;
    format!(
        "Summary: {} only in {}, {} only in {}, {} modified, {} unchanged",
        stats.only_left,
        result.left_root.display(),
        stats.only_right,
        result.right_root.display(),
        stats.modified,
        stats.unchanged
    )
}

fn write_json_value<W: Write + ?Sized>(
    value: &serde_json::Value,
    out: &mut W,
) -> Result<(), OutputError> {
    let text = serde_json::to_string_pretty(value)?;
    writeln!(out, "{}", text)?;
    Ok(())
}

fn path_to_json(path: &Path) -> serde_json::Value {
    json!(path.to_string_lossy())
}

fn files_to_json(files: &FileSet) -> serde_json::Value {
    let entries: Vec<serde_json::Value> = files
        .iter()
        .map(|record| {
            json!({
                "path": path_to_json(&record.path),
                "relative_path": record.relative_path,
                "line_count": record.line_count(),
                "lines": record.lines,
            })
        })
        .collect();

    json!({
        "root": path_to_json(files.root()),
        "files": entries,
        "stats": {
            "files": files.len(),
            "lines": files.total_lines(),
        }
    })
}

fn comparison_to_json(result: &ReconciliationResult) -> serde_json::Value {
    let changes: Vec<serde_json::Value> = result
        .changes()
        .map(|(path, change)| {
            let (status, left_lines, right_lines) = match change {
                FileChange::OnlyLeft(record) => ("only_left", Some(record.line_count()), None),
                FileChange::OnlyRight(record) => ("only_right", None, Some(record.line_count())),
                FileChange::Modified {
                    left_line_count,
                    right_line_count,
                    ..
                } => ("modified", Some(*left_line_count), Some(*right_line_count)),
                FileChange::Unchanged { line_count } => {
                    ("unchanged", Some(*line_count), Some(*line_count))
                }
            };
            let hunks = change.hunks();
            let line_stats = LineStats::from_hunks(&hunks);
            json!({
                "path": path,
                "status": status,
                "left_lines": left_lines,
                "right_lines": right_lines,
                "removed_lines": line_stats.removed,
                "added_lines": line_stats.added,
                "hunks": hunks,
            })
        })
        .collect();

    let unchanged: Vec<serde_json::Value> = result
        .unchanged()
        .map(|(path, line_count)| json!({ "path": path, "lines": line_count }))
        .collect();

    json!({
        "left_root": path_to_json(&result.left_root),
        "right_root": path_to_json(&result.right_root),
        "changes": changes,
        "unchanged": unchanged,
        "stats": {
            "only_left": result.stats.only_left,
            "only_right": result.stats.only_right,
            "modified": result.stats.modified,
            "unchanged": result.stats.unchanged,
        }
    })
}
