//! Error types for autocommit modules using thiserror.

use thiserror::Error;

/// Errors from running the git executable.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to spawn git: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("Git command failed: {detail}")]
    CommandFailed {
        command: String,
        code: i32,
        detail: String,
    },

    #[error("Invalid git invocation: {0}")]
    InvalidArgument(String),
}

impl GitError {
    /// Build a `CommandFailed` from a finished process, preferring stderr.
    pub fn command_failed(args: &[String], code: i32, stderr: &str, stdout: &str) -> Self {
        let detail = if stderr.trim().is_empty() {
            stdout.trim().to_string()
        } else {
            stderr.trim().to_string()
        };
        GitError::CommandFailed {
            command: format!("git {}", args.join(" ")),
            code,
            detail,
        }
    }
}

/// Errors raised at the tool boundary before they are rendered as payloads.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid parameters for {tool}: {reason}")]
    InvalidParams { tool: String, reason: String },

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error("Failed to serialize tool output: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from the MCP stdio server.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("MCP server failed to initialize: {0}")]
    Initialize(String),

    #[error("MCP server task failed: {0}")]
    Task(String),
}
