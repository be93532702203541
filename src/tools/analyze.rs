//! `analyze_changes` tool.

use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::commit::CommitType;
use crate::error::ToolError;
use crate::git::analyzer::{AnalyzeOptions, ChangesSummary, analyze_changes};
use crate::git::diff::{FileChange, FileStatus};
use crate::tools::{ANALYZE_CHANGES, ToolContext, ToolResponse, default_true, parse_params};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AnalyzeChangesParams {
    /// Include staged changes in analysis
    #[serde(default = "default_true")]
    pub include_staged: bool,
    /// Include unstaged changes in analysis
    #[serde(default)]
    pub include_unstaged: bool,
    /// Working directory (defaults to current directory)
    #[serde(default)]
    pub cwd: Option<String>,
}

/// Compact per-file entry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FileEntry<'a> {
    path: &'a str,
    status: FileStatus,
    changes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    old_path: Option<&'a str>,
}

impl<'a> From<&'a FileChange> for FileEntry<'a> {
    fn from(file: &'a FileChange) -> Self {
        Self {
            path: &file.path,
            status: file.status,
            changes: format!("+{}/-{}", file.additions, file.deletions),
            old_path: file.old_path.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryTotals<'a> {
    total_files: usize,
    total_additions: usize,
    total_deletions: usize,
    extensions: &'a BTreeSet<String>,
    directories: &'a BTreeSet<String>,
}

#[derive(Debug, Serialize)]
struct Suggested<'a> {
    #[serde(rename = "type")]
    commit_type: Option<CommitType>,
    scope: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct AnalyzeOutput<'a> {
    files: Vec<FileEntry<'a>>,
    summary: SummaryTotals<'a>,
    suggested: Suggested<'a>,
}

impl<'a> From<&'a ChangesSummary> for AnalyzeOutput<'a> {
    fn from(summary: &'a ChangesSummary) -> Self {
        Self {
            files: summary.files.iter().map(FileEntry::from).collect(),
            summary: SummaryTotals {
                total_files: summary.total_files,
                total_additions: summary.total_additions,
                total_deletions: summary.total_deletions,
                extensions: &summary.extensions,
                directories: &summary.top_directories,
            },
            suggested: Suggested {
                commit_type: summary.suggested_type,
                scope: summary.suggested_scope.as_deref(),
            },
        }
    }
}

/// Render a summary as the tool's JSON payload.
pub fn render_summary(summary: &ChangesSummary) -> Result<ToolResponse, ToolError> {
    ToolResponse::json(&AnalyzeOutput::from(summary))
}

pub(crate) async fn handle(ctx: &ToolContext, arguments: Value) -> Result<ToolResponse, ToolError> {
    run(ctx, parse_params(ANALYZE_CHANGES, arguments)?).await
}

pub async fn run(ctx: &ToolContext, params: AnalyzeChangesParams) -> Result<ToolResponse, ToolError> {
    let options = AnalyzeOptions {
        include_staged: params.include_staged,
        include_unstaged: params.include_unstaged,
        working_dir: ctx.resolve_dir(params.cwd.as_deref()),
    };

    match analyze_changes(ctx.runner.as_ref(), &options).await {
        Ok(summary) => render_summary(&summary),
        Err(e) => Ok(ToolResponse::error(format!("Error analyzing changes: {e}"))),
    }
}
