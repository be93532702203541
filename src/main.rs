//! autocommit - CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use dialoguer::Confirm;
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

use autocommit::commit::{CommitType, GenerateOptions, generate_commit_message};
use autocommit::git::{AnalyzeOptions, analyze_changes, stage_files};
use autocommit::server::run_stdio;
use autocommit::tools::{ANALYZE_CHANGES, EXECUTE_COMMIT, GENERATE_COMMIT_MESSAGE, ToolContext, ToolResponse, call_tool};

/// Summarize pending git changes and draft Conventional Commits messages.
#[derive(Parser, Debug)]
#[command(name = "autocommit")]
#[command(about = "Summarize pending git changes and draft Conventional Commits messages")]
#[command(version)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Repository directory (defaults to the current directory)
    #[arg(short = 'C', long = "cwd", global = true, default_value = ".")]
    cwd: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the MCP tool server on stdio
    Serve,

    /// Print a summary of pending changes
    Analyze(DiffSelection),

    /// Print a suggested commit message
    Generate {
        /// Override the commit type
        #[arg(long = "type")]
        commit_type: Option<CommitType>,

        /// Override the scope
        #[arg(long)]
        scope: Option<String>,

        /// Override the description
        #[arg(long)]
        description: Option<String>,

        /// Mark as a breaking change
        #[arg(long)]
        breaking: bool,

        #[command(flatten)]
        selection: DiffSelection,
    },

    /// Commit staged changes after confirmation
    Commit {
        /// Commit message (generated from staged changes if omitted)
        #[arg(short, long)]
        message: Option<String>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Stage paths for the next commit
    Stage {
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

/// Which side of the index to read.
#[derive(Args, Debug, Clone, Copy)]
struct DiffSelection {
    /// Exclude staged changes
    #[arg(long)]
    no_staged: bool,

    /// Include unstaged changes
    #[arg(long)]
    unstaged: bool,
}

impl DiffSelection {
    fn to_json(self) -> Value {
        json!({
            "include_staged": !self.no_staged,
            "include_unstaged": self.unstaged,
        })
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = ToolContext::system(cli.cwd.clone());

    match cli.command {
        Command::Serve => {
            run_stdio(ctx).await.context("MCP server failed")?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Analyze(selection) => {
            let response = call_tool(&ctx, ANALYZE_CHANGES, selection.to_json()).await;
            Ok(print_response(&response))
        }
        Command::Generate {
            commit_type,
            scope,
            description,
            breaking,
            selection,
        } => {
            let mut arguments = selection.to_json();
            arguments["type"] = json!(commit_type);
            arguments["scope"] = json!(scope);
            arguments["description"] = json!(description);
            arguments["breaking"] = json!(breaking);
            let response = call_tool(&ctx, GENERATE_COMMIT_MESSAGE, arguments).await;
            Ok(print_response(&response))
        }
        Command::Commit { message, yes } => commit(&ctx, message, yes).await,
        Command::Stage { paths } => {
            stage_files(ctx.runner.as_ref(), &paths, &ctx.default_dir)
                .await
                .context("Failed to stage files")?;
            println!("Staged {} path(s)", paths.len());
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Log to stderr; stdout is reserved for payloads and protocol messages.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_response(response: &ToolResponse) -> ExitCode {
    if response.is_error {
        eprintln!("{}", response.body());
        ExitCode::FAILURE
    } else {
        println!("{}", response.body());
        ExitCode::SUCCESS
    }
}

async fn commit(ctx: &ToolContext, message: Option<String>, yes: bool) -> Result<ExitCode> {
    let message = match message {
        Some(m) => m,
        None => {
            let options = AnalyzeOptions {
                working_dir: ctx.default_dir.clone(),
                ..Default::default()
            };
            let summary = analyze_changes(ctx.runner.as_ref(), &options)
                .await
                .context("Failed to analyze staged changes")?;
            if summary.is_empty() {
                bail!("No staged changes to commit. Stage some changes first with 'git add'.");
            }
            let result = generate_commit_message(&summary, &GenerateOptions::default());
            println!(
                "{} file(s), +{}/-{} ({} confidence)",
                summary.total_files, summary.total_additions, summary.total_deletions, result.confidence
            );
            result.message.full().to_string()
        }
    };

    println!("Commit message: {}", message);

    let confirmed = yes
        || Confirm::new()
            .with_prompt("Create this commit?")
            .default(true)
            .interact()
            .context("Failed to read confirmation")?;

    if !confirmed {
        println!("Commit cancelled.");
        return Ok(ExitCode::SUCCESS);
    }

    let response = call_tool(
        ctx,
        EXECUTE_COMMIT,
        json!({"message": message, "confirmed": true}),
    )
    .await;
    Ok(print_response(&response))
}
