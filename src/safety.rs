use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SafetyError {
    #[error("path escapes project root: {path} (root: {root})")]
    OutsideRoot { path: PathBuf, root: PathBuf },

    #[error("absolute paths are not allowed in a patch table: {0}")]
    AbsolutePath(PathBuf),
}

/// Resolve a table path against the project root.
///
/// The join is normalised lexically: `.` components are dropped and `..` pops
/// the previous component. Nothing touches the filesystem, so a missing file
/// still resolves and can be reported as not found by the caller.
pub fn resolve_target(root: &Path, relative: impl AsRef<Path>) -> Result<PathBuf, SafetyError> {
    let relative = relative.as_ref();

    if relative.has_root() {
        return Err(SafetyError::AbsolutePath(relative.to_path_buf()));
    }

    let root = normalize(root);
    let relative = normalize(relative);

    if matches!(relative.components().next(), Some(Component::ParentDir)) {
        return Err(SafetyError::OutsideRoot {
            path: normalize(&root.join(&relative)),
            root,
        });
    }

    Ok(root.join(relative))
}

/// Lexical path normalisation.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)));
                if popped {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }

    if out.as_os_str().is_empty() {
        out.push(".");
    }

    out
}
