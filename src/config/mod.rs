pub mod applicator;
pub mod builtin;
pub mod loader;
pub mod schema;

pub use applicator::{apply_table, ApplyError, FileReport, FileStatus, RunReport};
pub use builtin::{BUILTIN_TABLE, LINE_SEPARATOR};
pub use loader::{load_from_path, load_from_str, ConfigError};
pub use schema::{
    FileEntry, Metadata, PatchTable, ReplacementRule, ValidationError, ValidationIssue,
};
