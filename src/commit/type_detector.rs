//! Commit type suggestion from changed file paths.
//!
//! Each file is matched against an ordered rule table (test, docs, ci, build,
//! style, chore, perf). When the table gives no clear answer, file statuses
//! decide between feat, fix and chore.

use std::sync::LazyLock;

use regex_lite::Regex;
use tracing::debug;

use crate::commit::types::CommitType;
use crate::git::diff::{FileChange, FileStatus};

/// Directories treated as application source roots.
const SOURCE_ROOTS: [&str; 3] = ["src/", "lib/", "app/"];

/// A path rule for one commit type.
struct TypeRule {
    commit_type: CommitType,
    patterns: Vec<Regex>,
    priority: u8,
}

impl TypeRule {
    fn new(commit_type: CommitType, priority: u8, patterns: &[&str]) -> Self {
        Self {
            commit_type,
            priority,
            patterns: patterns
                .iter()
                .map(|p| Regex::new(p).expect("type rule pattern is a valid regex"))
                .collect(),
        }
    }

    fn matches(&self, path: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(path))
    }
}

/// Rule table, highest priority first.
static TYPE_RULES: LazyLock<Vec<TypeRule>> = LazyLock::new(|| {
    let mut rules = vec![
        TypeRule::new(
            CommitType::Test,
            10,
            &[
                r"\.test\.[jt]sx?$",
                r"\.spec\.[jt]sx?$",
                r"__tests__/",
                r"test/",
                r"tests/",
                r"\.cy\.[jt]sx?$",
                r"cypress/",
            ],
        ),
        TypeRule::new(
            CommitType::Docs,
            9,
            &[
                r"(?i)\.md$",
                r"^docs/",
                r"^documentation/",
                r"(?i)^README",
                r"(?i)CHANGELOG",
                r"(?i)LICENSE",
                r"\.txt$",
            ],
        ),
        TypeRule::new(
            CommitType::Ci,
            8,
            &[
                r"^\.github/workflows/",
                r"^\.github/actions/",
                r"^\.circleci/",
                r"^\.travis\.yml$",
                r"^\.gitlab-ci\.yml$",
                r"^Jenkinsfile$",
                r"^\.buildkite/",
            ],
        ),
        TypeRule::new(
            CommitType::Build,
            7,
            &[
                r"^package\.json$",
                r"^package-lock\.json$",
                r"^yarn\.lock$",
                r"^pnpm-lock\.yaml$",
                r"^tsconfig.*\.json$",
                r"^webpack\.",
                r"^vite\.config\.",
                r"^rollup\.config\.",
                r"^esbuild\.",
                r"^tsup\.config\.",
                r"^Makefile$",
                r"^CMakeLists\.txt$",
                r"^build\.",
                r"^Dockerfile$",
                r"^docker-compose",
            ],
        ),
        TypeRule::new(
            CommitType::Style,
            6,
            &[
                r"\.css$",
                r"\.scss$",
                r"\.sass$",
                r"\.less$",
                r"\.styled\.[jt]sx?$",
                r"^\.prettier",
                r"^\.eslint",
                r"^\.stylelint",
                r"^\.editorconfig$",
            ],
        ),
        TypeRule::new(
            CommitType::Chore,
            5,
            &[
                r"^\.gitignore$",
                r"^\.gitattributes$",
                r"^\.npmignore$",
                r"^\.nvmrc$",
                r"^\.node-version$",
                r"^\.env\.example$",
                r"\.lock$",
            ],
        ),
        TypeRule::new(
            CommitType::Perf,
            4,
            &[r"perf/", r"benchmark/", r"\.bench\.[jt]sx?$"],
        ),
    ];
    rules.sort_by(|a, b| b.priority.cmp(&a.priority));
    rules
});

/// Type of the first rule matching `path`, if any.
pub fn type_for_path(path: &str) -> Option<CommitType> {
    TYPE_RULES
        .iter()
        .find(|rule| rule.matches(path))
        .map(|rule| rule.commit_type)
}

/// Suggest a commit type for a set of changed files.
///
/// Returns `None` only for an empty set.
pub fn detect_type(files: &[FileChange]) -> Option<CommitType> {
    if files.is_empty() {
        return None;
    }

    let total = files.len();

    // Per-type match counts, kept in rule order.
    let mut counts: Vec<(CommitType, usize)> = Vec::new();
    for file in files {
        if let Some(ty) = type_for_path(&file.path) {
            match counts.iter_mut().find(|(t, _)| *t == ty) {
                Some((_, n)) => *n += 1,
                None => counts.push((ty, 1)),
            }
        }
    }

    let matched: usize = counts.iter().map(|(_, n)| n).sum();
    debug!("Type rules matched {}/{} files: {:?}", matched, total, counts);

    if matched == total && counts.len() == 1 {
        return Some(counts[0].0);
    }

    if let Some((ty, _)) = counts.iter().find(|(_, n)| *n > total / 2) {
        return Some(*ty);
    }

    Some(detect_from_status(files))
}

/// Fallback when path rules are inconclusive.
fn detect_from_status(files: &[FileChange]) -> CommitType {
    let total = files.len();
    let count = |status: FileStatus| files.iter().filter(|f| f.status == status).count();

    let added = count(FileStatus::Added);
    let modified = count(FileStatus::Modified);
    let deleted = count(FileStatus::Deleted);

    if deleted == total {
        return CommitType::Chore;
    }

    let added_in_source = files
        .iter()
        .filter(|f| f.status == FileStatus::Added)
        .filter(|f| SOURCE_ROOTS.iter().any(|root| f.path.starts_with(root)))
        .count();

    // Strict majority: 2x > n.
    if added_in_source * 2 > total {
        return CommitType::Feat;
    }
    if modified * 2 > total {
        return CommitType::Fix;
    }
    if added > 0 {
        return CommitType::Feat;
    }
    CommitType::Fix
}
