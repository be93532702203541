//! Git process spawning behind a mockable trait.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::GitError;

/// Environment variable to override the git executable.
pub const GIT_ENV_VAR: &str = "AUTOCOMMIT_GIT";

/// Default git executable name, looked up on PATH.
const DEFAULT_GIT: &str = "git";

/// Fully buffered output of a finished git process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl GitOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Trait for executing git commands.
///
/// This abstraction allows the analyzer and executor to run against a mock
/// in tests. Implementations return `Ok` for any exit status; only a failure
/// to run the process at all is an `Err`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitRunner: Send + Sync {
    /// Run git with `args` inside `cwd`.
    async fn run(&self, args: &[String], cwd: &Path) -> Result<GitOutput, GitError>;
}

/// Run a git command and turn a non-zero exit into [`GitError::CommandFailed`].
pub async fn run_checked<R: GitRunner + ?Sized>(
    runner: &R,
    args: &[String],
    cwd: &Path,
) -> Result<GitOutput, GitError> {
    let output = runner.run(args, cwd).await?;
    if !output.success() {
        return Err(GitError::command_failed(
            args,
            output.exit_code,
            &output.stderr,
            &output.stdout,
        ));
    }
    Ok(output)
}

/// Runner that spawns the system git binary.
#[derive(Debug, Clone)]
pub struct SystemGit {
    program: PathBuf,
}

impl SystemGit {
    /// Use the given executable.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Resolve the git executable from `AUTOCOMMIT_GIT`, falling back to `git`.
    ///
    /// The name is resolved with `which` so a missing binary is reported up
    /// front; an unresolved name is still kept so spawn errors surface per call.
    pub fn from_env() -> Self {
        let requested = match env::var(GIT_ENV_VAR) {
            Ok(v) if !v.trim().is_empty() => v,
            Ok(_) => {
                warn!("Empty {} value, using default '{}'", GIT_ENV_VAR, DEFAULT_GIT);
                DEFAULT_GIT.to_string()
            }
            Err(_) => DEFAULT_GIT.to_string(),
        };

        match which::which(&requested) {
            Ok(path) => Self::new(path),
            Err(e) => {
                warn!("Could not locate git executable '{}': {}", requested, e);
                Self::new(requested)
            }
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Default for SystemGit {
    fn default() -> Self {
        Self::from_env()
    }
}

#[async_trait]
impl GitRunner for SystemGit {
    async fn run(&self, args: &[String], cwd: &Path) -> Result<GitOutput, GitError> {
        debug!("Running git {} in {}", args.join(" "), cwd.display());

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(GitError::SpawnFailed)?;

        Ok(GitOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
        })
    }
}

/// Convenience for building owned argument vectors.
pub(crate) fn git_args<I, S>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    args.into_iter().map(Into::into).collect()
}
