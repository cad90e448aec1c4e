//! Console rendering for a run.
//!
//! Every line is returned as a `String` so the binary only decides where it
//! goes. Colors come from `colored` and honour `NO_COLOR`.

use crate::config::{FileReport, FileStatus, PatchTable, RunReport};
use colored::{ColoredString, Colorize};
use similar::{ChangeTag, TextDiff};
use std::fmt::Write as _;
use std::path::Path;

pub const BANNER: &str = "--- Starting Unused Code Cleaner Script (v2) ---";
pub const FINISHED: &str = "--- Script Finished ---";
pub const TRAILER: [&str; 2] = [
    "The unused code warnings should now be resolved.",
    "Remember to manually fix the remaining errors if you haven't already.",
];

fn glyph(status: &FileStatus) -> ColoredString {
    match status {
        FileStatus::Cleaned { .. } => "✅".green(),
        FileStatus::Unchanged => "☑️".cyan(),
        FileStatus::NotFound => "❌".red(),
        FileStatus::Failed { .. } => "🔥".red(),
    }
}

/// `<glyph> <message>` for one table entry.
pub fn status_line(report: &FileReport) -> String {
    format!("{} {}", glyph(&report.status), report)
}

/// Blank line, the finished marker, the counts, and the fixed trailer.
pub fn summary_lines(run: &RunReport) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        FINISHED.bold().to_string(),
        format!(
            "Made {} changes across {} file(s).",
            run.total_changes(),
            run.files_modified()
        ),
    ];
    lines.extend(TRAILER.iter().map(|line| line.to_string()));
    lines
}

/// Unified line diff between the original and patched text of one file.
pub fn diff(file: &Path, original: &str, patched: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", format!("--- {} (original)", file.display()).dimmed());
    let _ = writeln!(out, "{}", format!("+++ {} (patched)", file.display()).dimmed());

    let diff = TextDiff::from_lines(original, patched);
    for change in diff.iter_all_changes() {
        let line = match change.tag() {
            ChangeTag::Delete => format!("-{}", change).red(),
            ChangeTag::Insert => format!("+{}", change).green(),
            ChangeTag::Equal => format!(" {}", change).normal(),
        };
        let _ = write!(out, "{}", line);
        if change.missing_newline() {
            out.push('\n');
        }
    }

    out
}

/// Human-readable dump of a table, one entry per block.
pub fn table_listing(table: &PatchTable) -> String {
    let mut out = String::new();

    if !table.meta.name.is_empty() {
        let _ = writeln!(out, "{}", table.meta.name.bold());
    }
    if let Some(description) = &table.meta.description {
        let _ = writeln!(out, "{}", description.dimmed());
    }

    for entry in &table.files {
        let _ = writeln!(out, "{}", entry.path);
        for rule in &entry.rules {
            let _ = writeln!(out, "  {:?} -> {:?}", rule.find, rule.replace);
        }
    }

    let _ = write!(out, "{} file(s)", table.len());
    out
}
