//! Agent-facing tools: parameter validation, payload shaping, error payloads.
//!
//! Every tool returns a [`ToolResponse`]. Failures of any kind come back as
//! responses with `isError: true`; nothing escapes [`call_tool`].

pub mod analyze;
pub mod execute;
pub mod generate;

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::error::ToolError;
use crate::git::runner::{GitRunner, SystemGit};

pub const ANALYZE_CHANGES: &str = "analyze_changes";
pub const GENERATE_COMMIT_MESSAGE: &str = "generate_commit_message";
pub const EXECUTE_COMMIT: &str = "execute_commit";

/// One content block of a tool response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    Text { text: String },
}

/// Result of a tool call, success or error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolResponse {
    pub content: Vec<ToolContent>,
    #[serde(rename = "isError")]
    pub is_error: bool,
}

impl ToolResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: true,
        }
    }

    /// Pretty-printed JSON success payload.
    pub fn json<T: Serialize>(payload: &T) -> Result<Self, ToolError> {
        Ok(Self::text(serde_json::to_string_pretty(payload)?))
    }

    /// Compact JSON error payload.
    pub fn json_error<T: Serialize>(payload: &T) -> Result<Self, ToolError> {
        Ok(Self::error(serde_json::to_string(payload)?))
    }

    /// Concatenated text of all content blocks.
    pub fn body(&self) -> String {
        self.content
            .iter()
            .map(|c| match c {
                ToolContent::Text { text } => text.as_str(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Shared state for tool calls: the git runner and the default directory.
#[derive(Clone)]
pub struct ToolContext {
    pub runner: Arc<dyn GitRunner>,
    pub default_dir: PathBuf,
}

impl ToolContext {
    pub fn new(runner: Arc<dyn GitRunner>, default_dir: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            default_dir: default_dir.into(),
        }
    }

    /// Context using the system git binary.
    pub fn system(default_dir: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(SystemGit::from_env()), default_dir)
    }

    /// The `cwd` parameter if given, otherwise the default directory.
    pub fn resolve_dir(&self, cwd: Option<&str>) -> PathBuf {
        match cwd.map(str::trim).filter(|c| !c.is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => self.default_dir.clone(),
        }
    }
}

/// Deserialize tool arguments, treating `null` as an empty object.
pub(crate) fn parse_params<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T, ToolError> {
    let arguments = if arguments.is_null() { json!({}) } else { arguments };
    serde_json::from_value(arguments).map_err(|e| ToolError::InvalidParams {
        tool: tool.to_string(),
        reason: e.to_string(),
    })
}

pub(crate) fn default_true() -> bool {
    true
}

/// Dispatch a tool call by name.
pub async fn call_tool(ctx: &ToolContext, name: &str, arguments: Value) -> ToolResponse {
    debug!("Tool call: {} {}", name, arguments);

    let result = match name {
        ANALYZE_CHANGES => analyze::handle(ctx, arguments).await,
        GENERATE_COMMIT_MESSAGE => generate::handle(ctx, arguments).await,
        EXECUTE_COMMIT => execute::handle(ctx, arguments).await,
        other => Err(ToolError::UnknownTool(other.to_string())),
    };

    finish(name, result)
}

/// Render a tool error as an error response.
pub(crate) fn finish(name: &str, result: Result<ToolResponse, ToolError>) -> ToolResponse {
    result.unwrap_or_else(|e| {
        warn!("Tool {} rejected: {}", name, e);
        ToolResponse::error(e.to_string())
    })
}

impl From<ToolResponse> for CallToolResult {
    fn from(response: ToolResponse) -> Self {
        let content = response
            .content
            .into_iter()
            .map(|c| match c {
                ToolContent::Text { text } => Content::text(text),
            })
            .collect();
        if response.is_error {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        }
    }
}
