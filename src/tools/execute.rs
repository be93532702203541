//! `execute_commit` tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ToolError;
use crate::git::executor::{CommitResult, execute_commit};
use crate::tools::{EXECUTE_COMMIT, ToolContext, ToolResponse, parse_params};

// `message` and `confirmed` are required; an empty message is rejected by
// the executor, not here.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ExecuteCommitParams {
    /// The commit message to use
    pub message: String,
    /// Must be true to execute the commit (safety check)
    pub confirmed: bool,
    /// Working directory (defaults to current directory)
    #[serde(default)]
    pub cwd: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CommitSuccess<'a> {
    success: bool,
    commit_hash: Option<&'a str>,
    message: &'a str,
}

#[derive(Debug, Serialize)]
struct CommitFailure<'a> {
    success: bool,
    error: &'a str,
}

/// Render a commit result as the tool payload.
pub fn render_commit(result: &CommitResult, message: &str) -> Result<ToolResponse, ToolError> {
    if result.success {
        let body = serde_json::to_string(&CommitSuccess {
            success: true,
            commit_hash: result.commit_hash.as_deref(),
            message,
        })?;
        Ok(ToolResponse::text(body))
    } else {
        ToolResponse::json_error(&CommitFailure {
            success: false,
            error: result.error.as_deref().unwrap_or("Unknown error occurred"),
        })
    }
}

pub(crate) async fn handle(ctx: &ToolContext, arguments: Value) -> Result<ToolResponse, ToolError> {
    run(ctx, parse_params(EXECUTE_COMMIT, arguments)?).await
}

pub async fn run(ctx: &ToolContext, params: ExecuteCommitParams) -> Result<ToolResponse, ToolError> {
    let cwd = ctx.resolve_dir(params.cwd.as_deref());

    let result = execute_commit(ctx.runner.as_ref(), &params.message, params.confirmed, &cwd).await;
    render_commit(&result, &params.message)
}
