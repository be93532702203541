//! Parsing of `git diff --numstat` and `git diff --name-status` output.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Status of a changed file, serialized as git's one-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileStatus {
    #[serde(rename = "A")]
    Added,
    #[serde(rename = "M")]
    Modified,
    #[serde(rename = "D")]
    Deleted,
    #[serde(rename = "R")]
    Renamed,
    #[serde(rename = "C")]
    Copied,
    #[serde(rename = "U")]
    Unmerged,
}

impl FileStatus {
    /// Map a name-status code letter to a status.
    ///
    /// Type changes (`T`) are treated as modifications.
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'A' => Some(FileStatus::Added),
            'M' | 'T' => Some(FileStatus::Modified),
            'D' => Some(FileStatus::Deleted),
            'R' => Some(FileStatus::Renamed),
            'C' => Some(FileStatus::Copied),
            'U' => Some(FileStatus::Unmerged),
            _ => None,
        }
    }

    pub fn code(&self) -> char {
        match self {
            FileStatus::Added => 'A',
            FileStatus::Modified => 'M',
            FileStatus::Deleted => 'D',
            FileStatus::Renamed => 'R',
            FileStatus::Copied => 'C',
            FileStatus::Unmerged => 'U',
        }
    }

    /// Whether the status carries a source path.
    pub fn has_source(&self) -> bool {
        matches!(self, FileStatus::Renamed | FileStatus::Copied)
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileStatus::Added => write!(f, "Added"),
            FileStatus::Modified => write!(f, "Modified"),
            FileStatus::Deleted => write!(f, "Deleted"),
            FileStatus::Renamed => write!(f, "Renamed"),
            FileStatus::Copied => write!(f, "Copied"),
            FileStatus::Unmerged => write!(f, "Unmerged"),
        }
    }
}

/// One file's change in the current diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChange {
    pub path: String,
    pub status: FileStatus,
    pub additions: usize,
    pub deletions: usize,
    /// Source path for renamed or copied files.
    pub old_path: Option<String>,
}

impl FileChange {
    pub fn new(path: impl Into<String>, status: FileStatus) -> Self {
        Self {
            path: path.into(),
            status,
            additions: 0,
            deletions: 0,
            old_path: None,
        }
    }

    pub fn with_lines(mut self, additions: usize, deletions: usize) -> Self {
        self.additions = additions;
        self.deletions = deletions;
        self
    }

    pub fn with_old_path(mut self, old_path: impl Into<String>) -> Self {
        self.old_path = Some(old_path.into());
        self
    }

    /// Last path segment.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Line counts for one numstat entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineStats {
    pub additions: usize,
    pub deletions: usize,
}

/// A parsed name-status entry, keyed by its final path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub path: String,
    pub status: FileStatus,
    pub old_path: Option<String>,
}

/// Parse `git diff --numstat` output into line counts keyed by the path as
/// printed.
///
/// Binary files (`-\t-`) count as zero. Rename notation (`a => b`) is kept
/// verbatim since a plain file name may contain it too; see
/// [`split_rename_path`].
pub fn parse_numstat(output: &str) -> HashMap<String, LineStats> {
    let mut stats = HashMap::new();

    for line in output.lines().filter(|l| !l.trim().is_empty()) {
        let mut parts = line.splitn(3, '\t');
        let (Some(add), Some(del), Some(raw_path)) = (parts.next(), parts.next(), parts.next())
        else {
            warn!("Skipping malformed numstat line: {}", line);
            continue;
        };

        let entry = LineStats {
            additions: parse_count(add),
            deletions: parse_count(del),
        };
        stats.insert(raw_path.to_string(), entry);
    }

    stats
}

fn parse_count(value: &str) -> usize {
    value.trim().parse().unwrap_or(0)
}

/// Expand numstat rename notation into `(new_path, old_path)`.
///
/// Handles both `old => new` and `prefix/{old => new}/suffix`.
pub fn split_rename_path(raw: &str) -> (String, Option<String>) {
    if let (Some(open), Some(close)) = (raw.find('{'), raw.rfind('}')) {
        if open < close {
            let inner = &raw[open + 1..close];
            if let Some((old, new)) = inner.split_once(" => ") {
                let prefix = &raw[..open];
                let suffix = &raw[close + 1..];
                let new_path = collapse_slashes(&format!("{prefix}{new}{suffix}"));
                let old_path = collapse_slashes(&format!("{prefix}{old}{suffix}"));
                return (new_path, Some(old_path));
            }
        }
    }

    match raw.split_once(" => ") {
        Some((old, new)) => (new.to_string(), Some(old.to_string())),
        None => (raw.to_string(), None),
    }
}

fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        if c == '/' && out.ends_with('/') {
            continue;
        }
        out.push(c);
    }
    out.trim_start_matches('/').to_string()
}

/// Parse `git diff --name-status` output in output order.
///
/// Rename and copy lines look like `R087\told\tnew`.
pub fn parse_name_status(output: &str) -> Vec<StatusEntry> {
    let mut entries = Vec::new();

    for line in output.lines().filter(|l| !l.trim().is_empty()) {
        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() < 2 {
            warn!("Skipping malformed name-status line: {}", line);
            continue;
        }

        let Some(code) = parts[0].chars().next() else {
            continue;
        };
        let Some(status) = FileStatus::from_code(code) else {
            warn!("Skipping unsupported status '{}' for {}", parts[0], parts[1]);
            continue;
        };

        let entry = if status.has_source() && parts.len() >= 3 {
            StatusEntry {
                path: parts[2].to_string(),
                status,
                old_path: Some(parts[1].to_string()),
            }
        } else {
            StatusEntry {
                path: parts[1].to_string(),
                status,
                old_path: None,
            }
        };
        entries.push(entry);
    }

    entries
}
