use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use bump_version::cli::{BumpWorkflow, WorkflowOutcome};
use bump_version::config::{self, Config};
use bump_version::git::Git2Repository;
use bump_version::tool::NpmVersionTool;
use bump_version::ui;

#[derive(clap::Parser)]
#[command(
    name = "bump-version",
    about = "Bump the package version from commit keywords, then commit, tag and push"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Repository root (overrides GITHUB_WORKSPACE)")]
    workspace: Option<PathBuf>,

    #[arg(short, long, help = "Message to classify (overrides INPUT_MESSAGE)")]
    message: Option<String>,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() {
    let args = Args::parse();

    if args.version {
        println!("bump-version {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    match run(args) {
        Ok(outcome) => ui::display_success(outcome.final_message()),
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            ui::display_error(ui::MSG_FAILED);
            std::process::exit(1);
        }
    }
}

/// Build the configuration once, then run the workflow against the real
/// repository and `npm`.
fn run(args: Args) -> Result<WorkflowOutcome> {
    let config = build_config(&args)?;

    let mut repo = Git2Repository::open(&config.workspace)?;
    if let (Some(actor), Some(token)) = (&config.git.actor, &config.git.token) {
        repo = repo.with_credentials(actor.as_str(), token.as_str());
    }
    let tool = NpmVersionTool::new();

    let outcome = BumpWorkflow::new(&config, &repo, &tool)
        .dry_run(args.dry_run)
        .run()?;

    if let WorkflowOutcome::Planned { tag, branch, .. } = &outcome {
        ui::display_status(&format!("Would tag {} and push {}", tag, branch));
    }

    Ok(outcome)
}

fn build_config(args: &Args) -> Result<Config> {
    let mut config = config::load_config(args.config.as_deref())?;
    config.apply_env(|key| std::env::var(key).ok());

    if let Some(workspace) = &args.workspace {
        config.workspace = workspace.clone();
    }
    if let Some(message) = &args.message {
        config.message = Some(message.clone());
    }

    Ok(config)
}
