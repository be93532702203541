//! Conventional Commits message generation from a changes summary.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::commit::types::{CommitType, Confidence};
use crate::git::analyzer::ChangesSummary;
use crate::git::diff::{FileChange, FileStatus};

/// File count above which confidence drops to low.
const LOW_CONFIDENCE_FILE_COUNT: usize = 10;

/// A formatted commit message.
///
/// `full` is derived from the other fields in [`CommitMessage::new`] and has
/// no setter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitMessage {
    #[serde(rename = "type")]
    commit_type: CommitType,
    scope: Option<String>,
    description: String,
    breaking: bool,
    full: String,
}

impl CommitMessage {
    pub fn new(
        commit_type: CommitType,
        scope: Option<String>,
        description: impl Into<String>,
        breaking: bool,
    ) -> Self {
        let description = description.into();
        let full = format_commit_message(commit_type, scope.as_deref(), &description, breaking);
        Self {
            commit_type,
            scope,
            description,
            breaking,
            full,
        }
    }

    pub fn commit_type(&self) -> CommitType {
        self.commit_type
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn breaking(&self) -> bool {
        self.breaking
    }

    /// The complete header line, e.g. `feat(auth)!: add login`.
    pub fn full(&self) -> &str {
        &self.full
    }
}

/// Caller overrides for message generation.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub commit_type: Option<CommitType>,
    /// `None` keeps the suggested scope; a blank string drops the scope.
    pub scope: Option<String>,
    pub description: Option<String>,
    pub breaking: bool,
}

/// A generated message with its confidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateResult {
    pub message: CommitMessage,
    pub confidence: Confidence,
}

/// Format `type(scope)!: description`.
pub fn format_commit_message(
    commit_type: CommitType,
    scope: Option<&str>,
    description: &str,
    breaking: bool,
) -> String {
    let scope_part = scope.map(|s| format!("({s})")).unwrap_or_default();
    let breaking_mark = if breaking { "!" } else { "" };
    format!("{commit_type}{scope_part}{breaking_mark}: {description}")
}

/// Generate a commit message for `summary`, applying caller overrides.
pub fn generate_commit_message(summary: &ChangesSummary, options: &GenerateOptions) -> GenerateResult {
    let explicit_description = non_blank(options.description.as_deref());

    let commit_type = options
        .commit_type
        .or(summary.suggested_type)
        .unwrap_or(CommitType::Chore);
    let scope = match options.scope.as_deref() {
        Some(scope) => non_blank(Some(scope)).map(str::to_string),
        None => summary.suggested_scope.clone(),
    };
    let description = explicit_description
        .map(str::to_string)
        .unwrap_or_else(|| describe_changes(&summary.files));

    let confidence = if options.commit_type.is_some() && explicit_description.is_some() {
        Confidence::High
    } else if summary.total_files == 1 {
        Confidence::High
    } else if summary.total_files > LOW_CONFIDENCE_FILE_COUNT {
        Confidence::Low
    } else {
        Confidence::Medium
    };

    GenerateResult {
        message: CommitMessage::new(commit_type, scope, description, options.breaking),
        confidence,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Synthesize a short description of the changed files.
pub fn describe_changes(files: &[FileChange]) -> String {
    match files {
        [] => "no changes".to_string(),
        [file] => format!("{} {}", action_verb(file.status), file.file_name()),
        _ => describe_many(files),
    }
}

fn describe_many(files: &[FileChange]) -> String {
    let directories: BTreeSet<&str> = files.iter().map(|f| parent_dir(&f.path)).collect();
    if directories.len() == 1 {
        let dir = directories.into_iter().next().unwrap_or_default();
        let dir_name = match dir.rsplit('/').next() {
            Some(name) if !name.is_empty() => name,
            _ => "root",
        };
        return format!("update {} files in {}", files.len(), dir_name);
    }

    let count = |status: FileStatus| files.iter().filter(|f| f.status == status).count();
    let clauses: Vec<String> = [
        ("add", count(FileStatus::Added)),
        ("update", count(FileStatus::Modified)),
        ("remove", count(FileStatus::Deleted)),
        ("rename", count(FileStatus::Renamed)),
    ]
    .into_iter()
    .filter(|(_, n)| *n > 0)
    .map(|(verb, n)| format!("{verb} {n} {}", if n == 1 { "file" } else { "files" }))
    .collect();

    if clauses.is_empty() {
        return format!("update {} files", files.len());
    }
    clauses.join(", ")
}

fn parent_dir(path: &str) -> &str {
    path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

fn action_verb(status: FileStatus) -> &'static str {
    match status {
        FileStatus::Added => "add",
        FileStatus::Modified => "update",
        FileStatus::Deleted => "remove",
        FileStatus::Renamed => "rename",
        FileStatus::Copied => "copy",
        FileStatus::Unmerged => "update",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(files: Vec<FileChange>) -> ChangesSummary {
        ChangesSummary::from_files(files)
    }

    fn modified(paths: &[&str]) -> Vec<FileChange> {
        paths
            .iter()
            .map(|p| FileChange::new(*p, FileStatus::Modified))
            .collect()
    }

    #[test]
    fn test_format_variants() {
        assert_eq!(
            format_commit_message(CommitType::Feat, Some("auth"), "add login", false),
            "feat(auth): add login"
        );
        assert_eq!(
            format_commit_message(CommitType::Fix, None, "handle timeout", false),
            "fix: handle timeout"
        );
        assert_eq!(
            format_commit_message(CommitType::Feat, Some("api"), "drop v1", true),
            "feat(api)!: drop v1"
        );
        assert_eq!(
            format_commit_message(CommitType::Refactor, None, "split module", true),
            "refactor!: split module"
        );
    }

    #[test]
    fn test_single_source_file_scenario() {
        let s = summary(vec![
            FileChange::new("src/auth/login.ts", FileStatus::Modified).with_lines(10, 2),
        ]);
        let result = generate_commit_message(&s, &GenerateOptions::default());
        assert_eq!(result.message.commit_type(), CommitType::Fix);
        assert_eq!(result.message.scope(), Some("auth"));
        assert_eq!(result.message.description(), "update login.ts");
        assert_eq!(result.message.full(), "fix(auth): update login.ts");
        assert_eq!(result.confidence, Confidence::High);
    }

    #[test]
    fn test_readme_scenario() {
        let s = summary(modified(&["README.md"]));
        let result = generate_commit_message(&s, &GenerateOptions::default());
        assert_eq!(result.message.commit_type(), CommitType::Docs);
        assert_eq!(result.message.description(), "update README.md");
        assert_eq!(result.message.full(), "docs(readme): update README.md");
        assert_eq!(result.confidence, Confidence::High);
    }

    #[test]
    fn test_many_files_low_confidence() {
        let paths: Vec<String> = (0..15).map(|i| format!("dir{i}/file{i}.rs")).collect();
        let refs: Vec<&str> = paths.iter().map(String::as_str).collect();
        let result = generate_commit_message(&summary(modified(&refs)), &GenerateOptions::default());
        assert_eq!(result.confidence, Confidence::Low);
    }

    #[test]
    fn test_explicit_type_and_description_is_high_even_for_many_files() {
        let paths: Vec<String> = (0..12).map(|i| format!("src/m{i}/x.rs")).collect();
        let refs: Vec<&str> = paths.iter().map(String::as_str).collect();
        let options = GenerateOptions {
            commit_type: Some(CommitType::Refactor),
            description: Some("restructure modules".to_string()),
            ..Default::default()
        };
        let result = generate_commit_message(&summary(modified(&refs)), &options);
        assert_eq!(result.confidence, Confidence::High);
        assert_eq!(result.message.full(), "refactor: restructure modules");
    }

    #[test]
    fn test_medium_confidence_for_small_sets() {
        let s = summary(modified(&["src/a/x.rs", "src/b/y.rs", "src/c/z.rs"]));
        let result = generate_commit_message(&s, &GenerateOptions::default());
        assert_eq!(result.confidence, Confidence::Medium);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let s = summary(modified(&["src/auth/login.ts"]));
        let options = GenerateOptions {
            commit_type: Some(CommitType::Feat),
            scope: Some("session".to_string()),
            description: Some("support refresh tokens".to_string()),
            breaking: true,
        };
        let result = generate_commit_message(&s, &options);
        assert_eq!(result.message.full(), "feat(session)!: support refresh tokens");
        assert!(result.message.breaking());
    }

    #[test]
    fn test_blank_description_is_ignored() {
        let s = summary(modified(&["src/auth/login.ts"]));
        let options = GenerateOptions {
            description: Some("  ".to_string()),
            ..Default::default()
        };
        let result = generate_commit_message(&s, &options);
        assert_eq!(result.message.full(), "fix(auth): update login.ts");
    }

    #[test]
    fn test_blank_scope_drops_suggested_scope() {
        let s = summary(modified(&["src/auth/login.ts"]));
        for blank in ["", "  "] {
            let options = GenerateOptions {
                scope: Some(blank.to_string()),
                ..Default::default()
            };
            let result = generate_commit_message(&s, &options);
            assert_eq!(result.message.full(), "fix: update login.ts");
            assert_eq!(result.message.scope(), None);
        }
    }

    #[test]
    fn test_defaults_without_suggestions() {
        let s = summary(Vec::new());
        let result = generate_commit_message(&s, &GenerateOptions::default());
        assert_eq!(result.message.full(), "chore: no changes");
        assert_eq!(result.message.scope(), None);
        assert_eq!(result.confidence, Confidence::Medium);
    }

    #[test]
    fn test_generation_is_idempotent_and_round_trips() {
        let s = summary(vec![
            FileChange::new("src/api/users.ts", FileStatus::Added),
            FileChange::new("src/api/posts.ts", FileStatus::Modified),
            FileChange::new("tests/api.test.ts", FileStatus::Added),
        ]);
        let options = GenerateOptions {
            breaking: true,
            ..Default::default()
        };
        let first = generate_commit_message(&s, &options);
        let second = generate_commit_message(&s, &options);
        assert_eq!(first, second);

        let m = &first.message;
        assert_eq!(
            m.full(),
            format_commit_message(m.commit_type(), m.scope(), m.description(), m.breaking())
        );
    }

    #[test]
    fn test_describe_single_file_verbs() {
        let cases = [
            (FileStatus::Added, "add main.rs"),
            (FileStatus::Modified, "update main.rs"),
            (FileStatus::Deleted, "remove main.rs"),
            (FileStatus::Renamed, "rename main.rs"),
            (FileStatus::Copied, "copy main.rs"),
            (FileStatus::Unmerged, "update main.rs"),
        ];
        for (status, expected) in cases {
            assert_eq!(describe_changes(&[FileChange::new("src/main.rs", status)]), expected);
        }
    }

    #[test]
    fn test_describe_shared_directory() {
        let files = modified(&["src/auth/login.ts", "src/auth/session.ts"]);
        assert_eq!(describe_changes(&files), "update 2 files in auth");

        let files = modified(&["Cargo.toml", "README.md", "LICENSE"]);
        assert_eq!(describe_changes(&files), "update 3 files in root");
    }

    #[test]
    fn test_describe_status_clauses() {
        let files = vec![
            FileChange::new("src/a.rs", FileStatus::Added),
            FileChange::new("src/b.rs", FileStatus::Added),
            FileChange::new("docs/c.md", FileStatus::Modified),
            FileChange::new("old/d.rs", FileStatus::Deleted),
            FileChange::new("lib/e.rs", FileStatus::Renamed),
        ];
        assert_eq!(
            describe_changes(&files),
            "add 2 files, update 1 file, remove 1 file, rename 1 file"
        );
    }

    #[test]
    fn test_describe_without_clauses() {
        let files = vec![
            FileChange::new("a/x.rs", FileStatus::Copied),
            FileChange::new("b/y.rs", FileStatus::Unmerged),
        ];
        assert_eq!(describe_changes(&files), "update 2 files");
    }
}
