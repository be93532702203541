//! autocommit - Summarize pending git changes and draft Conventional Commits messages.
//!
//! # Overview
//!
//! autocommit reads staged and/or unstaged changes through the git CLI, builds a
//! compact summary with a suggested commit type and scope, drafts a
//! `type(scope)!: description` message, and commits only after explicit
//! confirmation. The three operations are exposed as agent tools over a
//! stdio MCP server and as CLI subcommands.

pub mod commit;
pub mod error;
pub mod git;
pub mod server;
pub mod tools;

// Re-export commonly used types
pub use commit::{CommitMessage, CommitType, Confidence, GenerateOptions, GenerateResult};
pub use error::{GitError, ServerError, ToolError};
pub use git::{AnalyzeOptions, ChangesSummary, CommitResult, FileChange, FileStatus, GitRunner, SystemGit};
pub use tools::{ToolContext, ToolResponse, call_tool};
pub use server::AutocommitServer;
