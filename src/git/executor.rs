//! Commit execution and staging.
//!
//! Commits go through the system `git` binary so the user's hooks, signing
//! and identity config apply.

use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::GitError;
use crate::git::runner::{GitRunner, git_args, run_checked};

pub const NOT_CONFIRMED: &str = "Commit not confirmed. Set confirmed=true to execute the commit.";
pub const EMPTY_MESSAGE: &str = "Commit message cannot be empty.";
pub const NOTHING_STAGED: &str = "No staged changes to commit.";

/// Outcome of a commit attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitResult {
    pub success: bool,
    pub commit_hash: Option<String>,
    pub error: Option<String>,
}

impl CommitResult {
    pub fn committed(commit_hash: Option<String>) -> Self {
        Self {
            success: true,
            commit_hash,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            commit_hash: None,
            error: Some(error.into()),
        }
    }
}

/// Commit the staged tree with `message`.
///
/// Refuses without an explicit confirmation or with a blank message, before
/// touching git. Every git failure is reported in the result rather than
/// returned as an error.
pub async fn execute_commit<R: GitRunner + ?Sized>(
    runner: &R,
    message: &str,
    confirmed: bool,
    working_dir: &Path,
) -> CommitResult {
    if !confirmed {
        return CommitResult::failed(NOT_CONFIRMED);
    }
    if message.trim().is_empty() {
        return CommitResult::failed(EMPTY_MESSAGE);
    }

    match commit_staged(runner, message, working_dir).await {
        Ok(result) => result,
        Err(e) => {
            warn!("Commit failed: {}", e);
            CommitResult::failed(e.to_string())
        }
    }
}

async fn commit_staged<R: GitRunner + ?Sized>(
    runner: &R,
    message: &str,
    cwd: &Path,
) -> Result<CommitResult, GitError> {
    // `--quiet` exits 1 when the index differs from HEAD.
    let check_args = git_args(["diff", "--cached", "--quiet"]);
    let check = runner.run(&check_args, cwd).await?;
    match check.exit_code {
        0 => return Ok(CommitResult::failed(NOTHING_STAGED)),
        1 => {}
        code => {
            return Err(GitError::command_failed(
                &check_args,
                code,
                &check.stderr,
                &check.stdout,
            ));
        }
    }

    let commit_args = git_args(["commit", "-m", message]);
    let commit = runner.run(&commit_args, cwd).await?;
    if !commit.success() {
        let detail = if commit.stderr.trim().is_empty() {
            commit.stdout
        } else {
            commit.stderr
        };
        return Ok(CommitResult::failed(detail.trim()));
    }

    let hash = match run_checked(runner, &git_args(["rev-parse", "HEAD"]), cwd).await {
        Ok(output) => Some(output.stdout.trim().to_string()).filter(|h| !h.is_empty()),
        Err(e) => {
            warn!("Commit created but its hash could not be read: {}", e);
            None
        }
    };

    info!("Created commit {}", hash.as_deref().unwrap_or("(unknown)"));
    Ok(CommitResult::committed(hash))
}

/// Stage `paths` with `git add`.
pub async fn stage_files<R: GitRunner + ?Sized>(
    runner: &R,
    paths: &[String],
    working_dir: &Path,
) -> Result<(), GitError> {
    if paths.is_empty() {
        return Err(GitError::InvalidArgument("No files to stage".into()));
    }

    let mut args = git_args(["add", "--"]);
    args.extend(paths.iter().cloned());
    run_checked(runner, &args, working_dir).await?;
    Ok(())
}
