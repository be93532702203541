//! `generate_commit_message` tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::commit::{CommitType, Confidence, GenerateOptions, GenerateResult, generate_commit_message};
use crate::error::ToolError;
use crate::git::analyzer::{AnalyzeOptions, ChangesSummary, analyze_changes};
use crate::tools::{GENERATE_COMMIT_MESSAGE, ToolContext, ToolResponse, default_true, parse_params};

pub const NO_CHANGES: &str = "No changes found to generate commit message";
const NO_CHANGES_HINT: &str = "Stage some changes first with 'git add'";

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GenerateMessageParams {
    /// Override the commit type (feat, fix, docs, etc.)
    #[serde(rename = "type", default)]
    pub commit_type: Option<CommitType>,
    /// Override the scope (e.g., auth, api, ui); an empty string removes it
    #[serde(default)]
    pub scope: Option<String>,
    /// Override the description text
    #[serde(default)]
    pub description: Option<String>,
    /// Mark as breaking change
    #[serde(default)]
    pub breaking: bool,
    /// Include staged changes
    #[serde(default = "default_true")]
    pub include_staged: bool,
    /// Include unstaged changes
    #[serde(default)]
    pub include_unstaged: bool,
    /// Working directory (defaults to current directory)
    #[serde(default)]
    pub cwd: Option<String>,
}

impl GenerateMessageParams {
    fn overrides(&self) -> GenerateOptions {
        GenerateOptions {
            commit_type: self.commit_type,
            scope: self.scope.clone(),
            description: self.description.clone(),
            breaking: self.breaking,
        }
    }
}

#[derive(Debug, Serialize)]
struct Components<'a> {
    #[serde(rename = "type")]
    commit_type: CommitType,
    scope: Option<&'a str>,
    description: &'a str,
    breaking: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Analysis {
    total_files: usize,
    total_additions: usize,
    total_deletions: usize,
}

#[derive(Debug, Serialize)]
struct GenerateOutput<'a> {
    message: &'a str,
    components: Components<'a>,
    confidence: Confidence,
    analysis: Analysis,
}

/// Render a generated message and its analysis totals as the tool payload.
pub fn render_result(
    result: &GenerateResult,
    summary: &ChangesSummary,
) -> Result<ToolResponse, ToolError> {
    let message = &result.message;
    ToolResponse::json(&GenerateOutput {
        message: message.full(),
        components: Components {
            commit_type: message.commit_type(),
            scope: message.scope(),
            description: message.description(),
            breaking: message.breaking(),
        },
        confidence: result.confidence,
        analysis: Analysis {
            total_files: summary.total_files,
            total_additions: summary.total_additions,
            total_deletions: summary.total_deletions,
        },
    })
}

pub(crate) async fn handle(ctx: &ToolContext, arguments: Value) -> Result<ToolResponse, ToolError> {
    run(ctx, parse_params(GENERATE_COMMIT_MESSAGE, arguments)?).await
}

pub async fn run(ctx: &ToolContext, params: GenerateMessageParams) -> Result<ToolResponse, ToolError> {
    let options = AnalyzeOptions {
        include_staged: params.include_staged,
        include_unstaged: params.include_unstaged,
        working_dir: ctx.resolve_dir(params.cwd.as_deref()),
    };

    let summary = match analyze_changes(ctx.runner.as_ref(), &options).await {
        Ok(summary) => summary,
        Err(e) => {
            return Ok(ToolResponse::error(format!(
                "Error generating commit message: {e}"
            )));
        }
    };

    if summary.is_empty() {
        return ToolResponse::json_error(&json!({
            "error": NO_CHANGES,
            "suggestion": NO_CHANGES_HINT,
        }));
    }

    let result = generate_commit_message(&summary, &params.overrides());
    render_result(&result, &summary)
}
