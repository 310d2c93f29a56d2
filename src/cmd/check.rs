use std::sync::Arc;

use clap::Args;
use tracing::info;

use crate::config::{AppConfig, Settings};
use crate::context::AppContext;
use crate::domain::pull_request::PullRequestContext;
use crate::error::AppResult;
use crate::infra::github::GitHubClient;
use crate::infra::jira::JiraClient;
use crate::workflow::check::{BodyUpdate, CheckOutcome, check_pull_request};

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub settings: Settings,
    /// Compute the updated description without sending it to GitHub.
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn run(args: CheckArgs) -> AppResult<()> {
    let config = AppConfig::from_settings(&args.settings)?;
    let pr = PullRequestContext::from_settings(&args.settings)?;

    info!(
        enforcement = ?config.policy.enforcement,
        jira = %config.jira.base_url,
        "configuration loaded"
    );

    let issue_tracker = Arc::new(JiraClient::new(&config.jira, config.request_timeout)?);
    let code_host = Arc::new(GitHubClient::new(&config.github, config.request_timeout)?);
    let context = AppContext::new(config.policy, issue_tracker, code_host);

    let outcome = check_pull_request(&context, &pr, args.dry_run).await?;

    if let Some(body) = dry_run_output(&outcome) {
        println!("{body}");
    }

    let verified = outcome.results.iter().filter(|r| r.is_verified()).count();
    info!(
        verified,
        total = outcome.results.len(),
        updated = outcome.update == BodyUpdate::Updated,
        "All PR standards met!"
    );
    Ok(())
}

/// The description a dry run would have submitted, for stdout.
fn dry_run_output(outcome: &CheckOutcome) -> Option<&str> {
    (outcome.update == BodyUpdate::Skipped).then_some(outcome.body.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(update: BodyUpdate) -> CheckOutcome {
        CheckOutcome {
            results: Vec::new(),
            body: "<!-- jira-tickets:start -->\n...".to_string(),
            update,
        }
    }

    #[test]
    fn dry_run_prints_the_computed_body() {
        assert_eq!(
            dry_run_output(&outcome(BodyUpdate::Skipped)),
            Some("<!-- jira-tickets:start -->\n...")
        );
    }

    #[test]
    fn real_runs_print_nothing() {
        assert_eq!(dry_run_output(&outcome(BodyUpdate::Updated)), None);
        assert_eq!(dry_run_output(&outcome(BodyUpdate::Unchanged)), None);
    }
}
