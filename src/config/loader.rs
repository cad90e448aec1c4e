//! Patch table files.
//!
//! A table file is TOML with a `[meta]` block and one `[[files]]` entry per
//! target; see [`PatchTable`]. Tables are validated before they are returned.

use crate::config::schema::{PatchTable, ValidationError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read patch table from {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse patch table TOML{}: {source}", origin(.path))]
    Toml {
        path: Option<PathBuf>,
        source: toml_edit::de::Error,
    },

    #[error("invalid patch table{}: {source}", origin(.path))]
    Validation {
        path: Option<PathBuf>,
        source: ValidationError,
    },
}

fn origin(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" ({})", p.display()))
        .unwrap_or_default()
}

/// Parse and validate a table held in memory.
pub fn load_from_str(input: &str) -> Result<PatchTable, ConfigError> {
    parse_table(input, None)
}

/// Read, parse and validate a table file. Parse and validation errors carry
/// the file path.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<PatchTable, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_table(&contents, Some(path))
}

fn parse_table(input: &str, file: Option<&Path>) -> Result<PatchTable, ConfigError> {
    let path = || file.map(Path::to_path_buf);

    let table: PatchTable = toml_edit::de::from_str(input).map_err(|source| ConfigError::Toml {
        path: path(),
        source,
    })?;

    table.validate().map_err(|source| ConfigError::Validation {
        path: path(),
        source,
    })?;

    Ok(table)
}
