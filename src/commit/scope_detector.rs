//! Commit scope suggestion from path structure.

use std::sync::LazyLock;

use regex_lite::Regex;
use tracing::debug;

use crate::git::diff::FileChange;

/// Percentage of files one scope must exceed to win when scopes disagree.
const DOMINANT_SCOPE_PERCENT: usize = 70;

/// Roots whose second segment names a module, only for nested paths.
const NESTED_ROOTS: [&str; 4] = ["packages", "src", "lib", "app"];

/// Roots whose second segment names a feature area.
const FEATURE_ROOTS: [&str; 5] = ["pages", "routes", "api", "features", "modules"];

static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").expect("valid camel-case regex"));

static SEPARATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_]+").expect("valid separator regex"));

/// Candidate scope for a single path.
pub fn scope_for_path(path: &str) -> Option<String> {
    let parts: Vec<&str> = path.split('/').collect();
    let root = parts[0];

    if NESTED_ROOTS.contains(&root) && parts.len() > 2 {
        return Some(parts[1].to_string());
    }

    if root == "components" && parts.len() > 1 {
        return Some(to_kebab_case(parts[1]));
    }

    if FEATURE_ROOTS.contains(&root) && parts.len() > 1 {
        return Some(parts[1].to_string());
    }

    if parts.len() == 1 {
        // Root-level file: `.eslintrc` -> eslintrc, `Cargo.toml` -> cargo
        let name = path.strip_prefix('.').unwrap_or(path);
        let word: String = name.chars().take_while(|c| c.is_ascii_alphabetic()).collect();
        if !word.is_empty() {
            return Some(word.to_lowercase());
        }
    }

    None
}

/// Convert `UserProfile` or `user_profile` to `user-profile`.
pub fn to_kebab_case(name: &str) -> String {
    let split = CAMEL_BOUNDARY.replace_all(name, "$1-$2");
    SEPARATOR_RUN.replace_all(&split, "-").to_lowercase()
}

/// Suggest a scope for a set of changed files.
///
/// A scope is returned only when it is the sole candidate or covers more than
/// 70% of all files.
pub fn detect_scope(files: &[FileChange]) -> Option<String> {
    if files.is_empty() {
        return None;
    }

    // Counts in first-seen order.
    let mut counts: Vec<(String, usize)> = Vec::new();
    for scope in files.iter().filter_map(|f| scope_for_path(&f.path)) {
        match counts.iter_mut().find(|(s, _)| *s == scope) {
            Some((_, n)) => *n += 1,
            None => counts.push((scope, 1)),
        }
    }

    debug!("Scope candidates for {} files: {:?}", files.len(), counts);

    if counts.len() == 1 {
        return counts.pop().map(|(scope, _)| scope);
    }

    let total = files.len();
    counts
        .into_iter()
        .find(|(_, n)| n * 100 > total * DOMINANT_SCOPE_PERCENT)
        .map(|(scope, _)| scope)
}
