use crate::config::schema::ReplacementRule;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Outcome of running a rule list over in-memory text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "Patched carries the rewritten text and the match count"]
pub struct Patched {
    /// Text after every rule has run
    pub content: String,
    /// Number of rules whose needle was present when the rule ran
    pub rule_matches: usize,
}

impl Patched {
    /// True when the rules left the text identical to `original`.
    ///
    /// Rules can match and still cancel each other out, so this is not the
    /// same as `rule_matches == 0`.
    pub fn is_unchanged(&self, original: &str) -> bool {
        self.content == original
    }
}

#[derive(Error, Debug)]
pub enum EditError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl EditError {
    pub fn io_kind(&self) -> std::io::ErrorKind {
        match self {
            EditError::Read { source, .. } | EditError::Write { source, .. } => source.kind(),
        }
    }
}

/// Apply `rules` to `content` in order.
///
/// Each rule is a global literal replace over the text as left by the
/// previous rule. A rule counts as a match when its needle occurs in that
/// intermediate text, even if an earlier rule is what produced the occurrence.
pub fn apply_rules(content: &str, rules: &[ReplacementRule]) -> Patched {
    let mut current = content.to_string();
    let mut rule_matches = 0;

    for rule in rules {
        if rule.find.is_empty() || !current.contains(rule.find.as_str()) {
            continue;
        }
        debug!(needle = %rule.find.escape_debug(), "rule matched");
        current = current.replace(rule.find.as_str(), &rule.replace);
        rule_matches += 1;
    }

    Patched {
        content: current,
        rule_matches,
    }
}

/// Read a whole file as UTF-8 without any newline translation.
pub fn read_text(path: &Path) -> Result<String, EditError> {
    fs::read_to_string(path).map_err(|source| EditError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Overwrite `path` in place with `content`.
///
/// The existing file is truncated and rewritten, so its permissions and
/// identity are kept. There is no partial-write protection.
pub fn write_back(path: &Path, content: &str) -> Result<(), EditError> {
    fs::write(path, content).map_err(|source| EditError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = content.len(), "wrote patched file");
    Ok(())
}
