//! Batch Patcher: literal find/replace cleanup across a fixed set of files
//!
//! A [`PatchTable`] maps project-relative paths to ordered
//! [`ReplacementRule`]s. Each file is read as UTF-8 with its line endings
//! untouched, every rule is applied as a global literal replace, and the file
//! is written back only when its text actually changed.
//!
//! # Accounting
//!
//! A rule counts as one change whenever its needle is present at the moment
//! the rule runs. The count is per rule application, not a diff size, so two
//! rules touching the same text both count.
//!
//! # Example
//!
//! ```no_run
//! use batch_patcher::{apply_table, PatchTable};
//! use std::path::Path;
//!
//! let report = apply_table(&PatchTable::builtin(), Path::new("."));
//! println!(
//!     "Made {} changes across {} file(s).",
//!     report.total_changes(),
//!     report.files_modified()
//! );
//! ```

pub mod config;
pub mod edit;
pub mod report;
pub mod safety;

// Re-exports
pub use config::{
    apply_table, load_from_path, load_from_str, ApplyError, ConfigError, FileEntry, FileReport,
    FileStatus, PatchTable, ReplacementRule, RunReport, ValidationError,
};
pub use edit::{apply_rules, EditError, Patched};
pub use safety::{resolve_target, SafetyError};
