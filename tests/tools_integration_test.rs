//! Tool payloads and the MCP server end to end against a real repository.

mod common;

use serde_json::{Value, json};

use rmcp::handler::server::wrapper::Parameters;

use autocommit::server::AutocommitServer;
use autocommit::tools::generate::GenerateMessageParams;
use autocommit::tools::{ANALYZE_CHANGES, EXECUTE_COMMIT, GENERATE_COMMIT_MESSAGE, call_tool};
use common::TestRepo;

fn payload(body: &str) -> Value {
    serde_json::from_str(body).expect("tool body is JSON")
}

#[tokio::test]
async fn test_generate_then_commit_flow() {
    let repo = TestRepo::new();
    repo.write("README.md", "# Project\n");
    repo.commit_all("docs: init");

    repo.write("README.md", "# Project\n\nUsage notes.\n");
    repo.stage("README.md");
    let ctx = repo.context();

    let analysis = call_tool(&ctx, ANALYZE_CHANGES, json!({})).await;
    assert!(!analysis.is_error);
    let analysis = payload(&analysis.body());
    assert_eq!(
        analysis["files"],
        json!([{"path": "README.md", "status": "M", "changes": "+2/-0"}])
    );
    assert_eq!(analysis["suggested"]["type"], "docs");

    let generated = call_tool(&ctx, GENERATE_COMMIT_MESSAGE, Value::Null).await;
    assert!(!generated.is_error);
    let generated = payload(&generated.body());
    assert_eq!(generated["message"], "docs(readme): update README.md");
    assert_eq!(generated["confidence"], "high");

    let message = generated["message"].as_str().unwrap();
    let committed = call_tool(
        &ctx,
        EXECUTE_COMMIT,
        json!({"message": message, "confirmed": true}),
    )
    .await;
    assert!(!committed.is_error, "{}", committed.body());
    let committed = payload(&committed.body());
    assert_eq!(committed["success"], true);
    assert_eq!(committed["commitHash"], repo.head_id().to_string());
    assert_eq!(repo.head_summary(), "docs(readme): update README.md");
}

#[tokio::test]
async fn test_generate_with_nothing_staged() {
    let repo = TestRepo::new();
    repo.write("a.txt", "a\n");
    repo.commit_all("chore: init");

    let response = call_tool(&repo.context(), GENERATE_COMMIT_MESSAGE, json!({})).await;
    assert!(response.is_error);
    assert_eq!(
        payload(&response.body())["error"],
        "No changes found to generate commit message"
    );
}

#[tokio::test]
async fn test_cwd_parameter_overrides_default_dir() {
    let repo = TestRepo::new();
    repo.write("src/ui/button.tsx", "export {}\n");
    repo.stage("src/ui/button.tsx");

    let elsewhere = tempfile::tempdir().unwrap();
    let ctx = autocommit::ToolContext::system(elsewhere.path());
    let cwd = repo.path().to_string_lossy().to_string();

    let response = call_tool(&ctx, GENERATE_COMMIT_MESSAGE, json!({"cwd": cwd})).await;
    assert!(!response.is_error, "{}", response.body());
    let generated = payload(&response.body());
    assert_eq!(generated["message"], "feat(ui): add button.tsx");
}

#[tokio::test]
async fn test_mcp_tool_against_repository() {
    let repo = TestRepo::new();
    repo.write("docs/guide.md", "guide\n");
    repo.stage("docs/guide.md");
    let server = AutocommitServer::new(repo.context());

    let params = GenerateMessageParams {
        commit_type: None,
        scope: None,
        description: None,
        breaking: false,
        include_staged: true,
        include_unstaged: false,
        cwd: None,
    };
    let result = server
        .generate_commit_message(Parameters(params))
        .await
        .expect("tool call result");

    let value = serde_json::to_value(&result).unwrap();
    assert_ne!(value["isError"], true);
    let generated = payload(value["content"][0]["text"].as_str().unwrap());
    assert_eq!(generated["message"], "docs: add guide.md");
    assert_eq!(generated["analysis"]["totalFiles"], 1);
}
