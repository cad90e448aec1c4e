use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;

/// Ordered file → rules table driving a run.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct PatchTable {
    #[serde(default)]
    pub meta: Metadata,
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

impl PatchTable {
    pub fn new(files: Vec<FileEntry>) -> Self {
        Self {
            meta: Metadata::default(),
            files,
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();
        let mut seen = HashSet::new();

        if self.files.is_empty() {
            issues.push(ValidationIssue::EmptyTable);
        }

        for entry in &self.files {
            if entry.path.trim().is_empty() {
                issues.push(ValidationIssue::MissingField {
                    path: None,
                    field: "path",
                });
                continue;
            }

            if !seen.insert(entry.path.as_str()) {
                issues.push(ValidationIssue::DuplicatePath {
                    path: entry.path.clone(),
                });
            }

            for (idx, rule) in entry.rules.iter().enumerate() {
                if rule.find.is_empty() {
                    issues.push(ValidationIssue::EmptyNeedle {
                        path: entry.path.clone(),
                        rule: idx,
                    });
                }
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Metadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// One target file and the rules applied to it, in order.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path relative to the project root
    pub path: String,
    #[serde(default)]
    pub rules: Vec<ReplacementRule>,
}

impl FileEntry {
    pub fn new(path: impl Into<String>, rules: Vec<ReplacementRule>) -> Self {
        Self {
            path: path.into(),
            rules,
        }
    }
}

/// Literal needle and its replacement.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ReplacementRule {
    pub find: String,
    #[serde(default)]
    pub replace: String,
}

impl ReplacementRule {
    pub fn new(find: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            find: find.into(),
            replace: replace.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    EmptyTable,
    MissingField {
        path: Option<String>,
        field: &'static str,
    },
    DuplicatePath {
        path: String,
    },
    EmptyNeedle {
        path: String,
        rule: usize,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::EmptyTable => write!(f, "patch table contains no files"),
            ValidationIssue::MissingField { path, field } => match path {
                Some(path) => write!(f, "entry '{path}' missing required field '{field}'"),
                None => write!(f, "entry missing required field '{field}'"),
            },
            ValidationIssue::DuplicatePath { path } => {
                write!(f, "entry '{path}' appears more than once")
            }
            ValidationIssue::EmptyNeedle { path, rule } => {
                write!(f, "entry '{path}' rule {rule} has an empty 'find'")
            }
        }
    }
}
