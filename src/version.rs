//! Version data as supplied by the data collaborator: the flat entry list
//! plus optional diff and linter data, loaded from a JSON file.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Kind of file-system object an entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// One file-system object belonging to a version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Slash-separated path without leading or trailing slash.
    pub path: String,
    /// Number of slashes in `path`.
    pub depth: usize,
    /// Final segment of `path`.
    pub filename: String,
    pub kind: EntryKind,
}

impl Entry {
    /// The path with the final segment removed, split into segments.
    pub fn parent_segments(&self) -> Vec<&str> {
        let mut parts: Vec<&str> = self.path.split('/').collect();
        parts.pop();
        parts
    }
}

#[cfg(test)]
impl Entry {
    /// Build an entry from a path, deriving `depth` and `filename`.
    pub fn new(path: &str, kind: EntryKind) -> Self {
        let filename = path.rsplit('/').next().unwrap_or(path).to_string();
        Self {
            path: path.to_string(),
            depth: path.matches('/').count(),
            filename,
            kind,
        }
    }

    pub fn file(path: &str) -> Self {
        Self::new(path, EntryKind::File)
    }

    pub fn directory(path: &str) -> Self {
        Self::new(path, EntryKind::Directory)
    }
}

/// A linter message attached to a version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinterMessage {
    pub uid: String,
    /// File path the message refers to; `None` for version-wide messages.
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub line: Option<u32>,
    pub message: String,
    #[serde(default = "default_severity")]
    pub severity: String,
}

fn default_severity() -> String {
    "warning".to_string()
}

/// A package version: its entries and whatever derived data has been loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Version {
    pub id: u64,
    pub name: String,
    pub entries: Vec<Entry>,
    /// Hunk anchors per file path, in file order. `None` means no diff loaded.
    #[serde(default)]
    pub diff: Option<BTreeMap<String, Vec<String>>>,
    /// `None` means no linter data loaded.
    #[serde(default)]
    pub messages: Option<Vec<LinterMessage>>,
}

impl Version {
    /// Read and parse a version JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let version = serde_json::from_str(&content)?;
        Ok(version)
    }
}
