//! Change analysis: query git, merge line counts with statuses, annotate.

use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info};

use crate::commit::scope_detector::detect_scope;
use crate::commit::type_detector::detect_type;
use crate::commit::types::CommitType;
use crate::error::GitError;
use crate::git::diff::{
    FileChange, LineStats, StatusEntry, parse_name_status, parse_numstat, split_rename_path,
};
use crate::git::runner::{GitRunner, run_checked};

/// Which trees to compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffMode {
    /// Index vs last commit.
    Staged,
    /// Working tree vs index.
    Unstaged,
    /// Working tree vs last commit.
    Combined,
}

impl DiffMode {
    pub fn from_flags(include_staged: bool, include_unstaged: bool) -> Self {
        match (include_staged, include_unstaged) {
            (true, false) => DiffMode::Staged,
            (true, true) => DiffMode::Combined,
            _ => DiffMode::Unstaged,
        }
    }

    fn base_args(&self) -> &'static [&'static str] {
        match self {
            DiffMode::Staged => &["--cached"],
            DiffMode::Unstaged => &[],
            DiffMode::Combined => &["HEAD"],
        }
    }

    /// `git diff` arguments for this mode followed by `format`.
    pub fn diff_args(&self, format: &str) -> Vec<String> {
        let mut args = vec!["diff".to_string()];
        args.extend(self.base_args().iter().map(|a| a.to_string()));
        args.push(format.to_string());
        args.push("--find-renames".to_string());
        args.push("--find-copies".to_string());
        args
    }
}

/// Options for [`analyze_changes`].
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub include_staged: bool,
    pub include_unstaged: bool,
    pub working_dir: PathBuf,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            include_staged: true,
            include_unstaged: false,
            working_dir: PathBuf::from("."),
        }
    }
}

impl AnalyzeOptions {
    pub fn mode(&self) -> DiffMode {
        DiffMode::from_flags(self.include_staged, self.include_unstaged)
    }
}

/// Summary of pending changes with type and scope suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangesSummary {
    pub files: Vec<FileChange>,
    pub total_files: usize,
    pub total_additions: usize,
    pub total_deletions: usize,
    pub extensions: BTreeSet<String>,
    pub top_directories: BTreeSet<String>,
    pub suggested_type: Option<CommitType>,
    pub suggested_scope: Option<String>,
}

impl ChangesSummary {
    /// Derive totals, extension and directory sets, and suggestions from `files`.
    pub fn from_files(files: Vec<FileChange>) -> Self {
        let total_additions = files.iter().map(|f| f.additions).sum();
        let total_deletions = files.iter().map(|f| f.deletions).sum();
        let extensions = files
            .iter()
            .filter_map(|f| extension(&f.path))
            .map(str::to_string)
            .collect();
        let top_directories = files
            .iter()
            .filter_map(|f| top_directory(&f.path))
            .map(str::to_string)
            .collect();
        let suggested_type = detect_type(&files);
        let suggested_scope = detect_scope(&files);

        Self {
            total_files: files.len(),
            files,
            total_additions,
            total_deletions,
            extensions,
            top_directories,
            suggested_type,
            suggested_scope,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Extension of the last path segment, if non-empty.
fn extension(path: &str) -> Option<&str> {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

/// First segment of a multi-segment path.
fn top_directory(path: &str) -> Option<&str> {
    path.split_once('/').map(|(dir, _)| dir)
}

/// Analyze pending changes in `options.working_dir`.
///
/// Runs `git diff --numstat` and `git diff --name-status` concurrently and
/// fails if either exits non-zero.
pub async fn analyze_changes<R: GitRunner + ?Sized>(
    runner: &R,
    options: &AnalyzeOptions,
) -> Result<ChangesSummary, GitError> {
    let mode = options.mode();
    let cwd = options.working_dir.as_path();
    let numstat_args = mode.diff_args("--numstat");
    let status_args = mode.diff_args("--name-status");

    debug!("Analyzing {:?} changes in {}", mode, cwd.display());

    let (numstat, name_status) = tokio::try_join!(
        run_checked(runner, &numstat_args, cwd),
        run_checked(runner, &status_args, cwd),
    )?;

    let line_stats = parse_numstat(&numstat.stdout);
    let entries = parse_name_status(&name_status.stdout);
    let files = merge_changes(entries, &line_stats);

    let summary = ChangesSummary::from_files(files);
    info!(
        "Analyzed {} files (+{}/-{}), suggested type {:?}, scope {:?}",
        summary.total_files,
        summary.total_additions,
        summary.total_deletions,
        summary.suggested_type,
        summary.suggested_scope
    );
    Ok(summary)
}

/// Join name-status entries with numstat counts.
///
/// Renamed and copied entries are looked up through the numstat rename
/// notation, then by source path; every other entry only by its path as
/// printed. Missing counts default to zero. A path listed twice keeps its
/// first position.
pub fn merge_changes(
    entries: Vec<StatusEntry>,
    line_stats: &HashMap<String, LineStats>,
) -> Vec<FileChange> {
    let renamed: HashMap<String, LineStats> = line_stats
        .iter()
        .filter_map(|(raw, stats)| match split_rename_path(raw) {
            (new_path, Some(_)) => Some((new_path, *stats)),
            (_, None) => None,
        })
        .collect();

    let mut files: Vec<FileChange> = Vec::with_capacity(entries.len());

    for entry in entries {
        let stats = if entry.status.has_source() {
            renamed
                .get(&entry.path)
                .or_else(|| line_stats.get(&entry.path))
                .or_else(|| entry.old_path.as_ref().and_then(|old| line_stats.get(old)))
        } else {
            line_stats.get(&entry.path)
        }
        .copied()
        .unwrap_or_default();

        let mut change = FileChange::new(entry.path, entry.status)
            .with_lines(stats.additions, stats.deletions);
        if let Some(old_path) = entry.old_path {
            change = change.with_old_path(old_path);
        }

        match files.iter_mut().find(|f| f.path == change.path) {
            Some(existing) => *existing = change,
            None => files.push(change),
        }
    }

    files
}
