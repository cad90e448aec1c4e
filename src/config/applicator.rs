//! Patch table applicator
//!
//! Runs every entry of a [`PatchTable`] against a project root, one file at a
//! time, and folds the per-file outcome into a [`RunReport`]. Per-file
//! failures never abort the run.

use crate::config::schema::{FileEntry, PatchTable};
use crate::edit::{self, EditError};
use crate::safety::{self, SafetyError};
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Final state of one table entry after a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// Content changed and was written back
    Cleaned { original: String, patched: String },
    /// Content identical after all rules ran; file untouched
    Unchanged,
    /// Nothing on disk at the resolved path
    NotFound,
    /// Any other failure (I/O, UTF-8 decoding, path escaping the root)
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// Path as written in the table
    pub relative: String,
    /// Path resolved against the project root
    pub full_path: PathBuf,
    /// Rules whose needle was present when they ran
    pub rule_matches: usize,
    pub status: FileStatus,
}

impl FileReport {
    pub fn is_modified(&self) -> bool {
        matches!(self.status, FileStatus::Cleaned { .. })
    }
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            FileStatus::Cleaned { .. } => write!(f, "Cleaned: {}", self.relative),
            FileStatus::Unchanged => write!(f, "No changes were needed for: {}", self.relative),
            FileStatus::NotFound => {
                write!(f, "Error: File not found at {}", self.full_path.display())
            }
            FileStatus::Failed { reason } => write!(
                f,
                "An unexpected error occurred with {}: {}",
                self.full_path.display(),
                reason
            ),
        }
    }
}

/// Everything a run produced, in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use = "RunReport should be reported to the operator"]
pub struct RunReport {
    pub files: Vec<FileReport>,
}

impl RunReport {
    /// Sum of per-file rule matches, including files that failed on write or
    /// whose rules cancelled out.
    pub fn total_changes(&self) -> usize {
        self.files.iter().map(|f| f.rule_matches).sum()
    }

    pub fn files_modified(&self) -> usize {
        self.files.iter().filter(|f| f.is_modified()).count()
    }
}

#[derive(Error, Debug)]
pub enum ApplyError {
    #[error(transparent)]
    Edit(#[from] EditError),

    #[error(transparent)]
    Safety(#[from] SafetyError),
}

impl ApplyError {
    /// Only a missing file on read counts as "not found".
    fn is_not_found(&self) -> bool {
        match self {
            ApplyError::Edit(e @ EditError::Read { .. }) => e.io_kind() == ErrorKind::NotFound,
            _ => false,
        }
    }

    /// Message shown to the operator; the underlying cause only.
    fn reason(&self) -> String {
        match self {
            ApplyError::Edit(EditError::Read { source, .. })
            | ApplyError::Edit(EditError::Write { source, .. }) => source.to_string(),
            ApplyError::Safety(e) => e.to_string(),
        }
    }
}

/// Apply a patch table to the project at `root`.
///
/// Entries run sequentially in table order. Missing files are reported and
/// never created.
pub fn apply_table(table: &PatchTable, root: &Path) -> RunReport {
    let files = table
        .files
        .iter()
        .map(|entry| apply_entry(entry, root, edit::write_back))
        .collect();

    RunReport { files }
}

fn apply_entry<W>(entry: &FileEntry, root: &Path, write: W) -> FileReport
where
    W: FnOnce(&Path, &str) -> Result<(), EditError>,
{
    let mut rule_matches = 0;
    let resolved = safety::resolve_target(root, &entry.path);
    let full_path = match &resolved {
        Ok(path) => path.clone(),
        Err(_) => safety::normalize(&root.join(&entry.path)),
    };

    let outcome = resolved
        .map_err(ApplyError::from)
        .and_then(|path| patch_file(entry, &path, &mut rule_matches, write));

    let status = match outcome {
        Ok(status) => status,
        Err(e) if e.is_not_found() => {
            warn!(path = %full_path.display(), "file not found");
            FileStatus::NotFound
        }
        Err(e) => {
            warn!(path = %full_path.display(), error = %e, "failed to patch file");
            FileStatus::Failed { reason: e.reason() }
        }
    };

    FileReport {
        relative: entry.path.clone(),
        full_path,
        rule_matches,
        status,
    }
}

/// `rule_matches` is written before the write-back so a failed write still
/// contributes its matches to the run total.
fn patch_file<W>(
    entry: &FileEntry,
    path: &Path,
    rule_matches: &mut usize,
    write: W,
) -> Result<FileStatus, ApplyError>
where
    W: FnOnce(&Path, &str) -> Result<(), EditError>,
{
    let original = edit::read_text(path)?;

    let patched = edit::apply_rules(&original, &entry.rules);
    *rule_matches = patched.rule_matches;
    debug!(
        path = %entry.path,
        rule_matches = patched.rule_matches,
        "rules evaluated"
    );

    if patched.is_unchanged(&original) {
        return Ok(FileStatus::Unchanged);
    }

    write(path, &patched.content)?;

    Ok(FileStatus::Cleaned {
        original,
        patched: patched.content,
    })
}
