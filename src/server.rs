//! MCP server exposing the commit tools over stdio.
//!
//! Protocol handling, schemas and the tool listing come from `rmcp`; each
//! tool delegates to the typed runner in [`crate::tools`] and returns its
//! payload as a call result, with failures flagged `isError`.

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, ServerCapabilities, ServerInfo};
use rmcp::{ErrorData as McpError, ServerHandler, ServiceExt, tool, tool_handler, tool_router};
use tracing::info;

use crate::error::ServerError;
use crate::tools::analyze::{self, AnalyzeChangesParams};
use crate::tools::execute::{self, ExecuteCommitParams};
use crate::tools::generate::{self, GenerateMessageParams};
use crate::tools::{ANALYZE_CHANGES, EXECUTE_COMMIT, GENERATE_COMMIT_MESSAGE, ToolContext, finish};

pub const SERVER_NAME: &str = "autocommit";

const INSTRUCTIONS: &str = "Analyze pending git changes, draft a Conventional Commits message, \
and commit it once the user has confirmed. execute_commit requires confirmed=true.";

/// Tool server bound to one [`ToolContext`].
#[derive(Clone)]
pub struct AutocommitServer {
    ctx: ToolContext,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl AutocommitServer {
    pub fn new(ctx: ToolContext) -> Self {
        Self {
            ctx,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Analyze git changes and return a token-efficient summary with file paths, status, additions/deletions, and suggested commit type/scope"
    )]
    pub async fn analyze_changes(
        &self,
        Parameters(params): Parameters<AnalyzeChangesParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = analyze::run(&self.ctx, params).await;
        Ok(finish(ANALYZE_CHANGES, result).into())
    }

    #[tool(
        description = "Generate a Conventional Commits message based on git changes. Can auto-detect type and scope, or accept overrides."
    )]
    pub async fn generate_commit_message(
        &self,
        Parameters(params): Parameters<GenerateMessageParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = generate::run(&self.ctx, params).await;
        Ok(finish(GENERATE_COMMIT_MESSAGE, result).into())
    }

    #[tool(
        description = "Execute a git commit with the provided message. Requires confirmed=true as a safety measure."
    )]
    pub async fn execute_commit(
        &self,
        Parameters(params): Parameters<ExecuteCommitParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = execute::run(&self.ctx, params).await;
        Ok(finish(EXECUTE_COMMIT, result).into())
    }
}

#[tool_handler]
impl ServerHandler for AutocommitServer {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.server_info.name = SERVER_NAME.to_string();
        info.server_info.version = env!("CARGO_PKG_VERSION").to_string();
        info.instructions = Some(INSTRUCTIONS.to_string());
        info
    }
}

/// Serve the tools on stdin/stdout until the client disconnects.
pub async fn run_stdio(ctx: ToolContext) -> Result<(), ServerError> {
    info!("{} MCP server listening on stdio", SERVER_NAME);

    let service = AutocommitServer::new(ctx)
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| ServerError::Initialize(e.to_string()))?;
    service
        .waiting()
        .await
        .map_err(|e| ServerError::Task(e.to_string()))?;

    info!("Client disconnected, shutting down");
    Ok(())
}
