//! Git access: process runner, diff parsing, change analysis, commits.

pub mod analyzer;
pub mod diff;
pub mod executor;
pub mod runner;

pub use analyzer::{AnalyzeOptions, ChangesSummary, DiffMode, analyze_changes};
pub use diff::{FileChange, FileStatus};
pub use executor::{CommitResult, execute_commit, stage_files};
pub use runner::{GitOutput, GitRunner, SystemGit};
