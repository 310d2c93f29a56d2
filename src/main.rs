mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cmd::check::{self, CheckArgs};
use crate::cmd::config as config_cmd;
use crate::config::Settings;
use crate::error::AppResult;

#[derive(Parser)]
#[command(
    name = "pr-ticket-gate",
    author,
    version,
    about = "Validate pull request Jira references and annotate the description"
)]
struct Cli {
    /// Log filter, e.g. "info" or "pr_ticket_gate=debug".
    #[arg(long, global = true, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the pull request and update its ticket block.
    Check(CheckArgs),
    /// Show the resolved configuration (secrets masked).
    Config(Settings),
}

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Printing can only fail on a closed stream; the exit code still applies.
            let _ = err.print();
            std::process::exit(usage_exit_code(err.kind()));
        }
    };

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(err) = run(cli.command).await {
        error!("{err}");
        std::process::exit(1);
    }
}

/// Help and version output succeed; any rejected input is a fatal error.
fn usage_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

async fn run(command: Commands) -> AppResult<()> {
    match command {
        Commands::Check(args) => check::run(args).await,
        Commands::Config(settings) => config_cmd::run(&settings),
    }
}
