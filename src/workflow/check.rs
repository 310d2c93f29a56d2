use futures::future::join_all;
use tracing::{info, warn};

use crate::config::EnforcementMode;
use crate::context::AppContext;
use crate::domain::info_block::{merge, render};
use crate::domain::pull_request::PullRequestContext;
use crate::domain::ticket::{TicketKeySet, TicketLookup, extract_keys};
use crate::domain::title::check_title_length;
use crate::error::{AppError, AppResult};
use crate::services::IssueTrackerService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Pass,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyUpdate {
    Updated,
    Unchanged,
    Skipped,
}

#[derive(Debug)]
pub struct CheckOutcome {
    pub results: Vec<TicketLookup>,
    pub body: String,
    pub update: BodyUpdate,
}

pub async fn check_pull_request(
    ctx: &AppContext,
    pr: &PullRequestContext,
    dry_run: bool,
) -> AppResult<CheckOutcome> {
    info!("Checking PR #{} in {}...", pr.number, pr.repository);

    let keys = extract_keys(&pr.title, &pr.branch);
    if keys.is_empty() {
        return Err(AppError::NoTicketKeys);
    }

    let title = check_title_length(&pr.title, ctx.policy.min_title_length);
    if !title.ok {
        return Err(AppError::TitleTooShort {
            length: title.length,
            minimum: ctx.policy.min_title_length,
        });
    }

    let results = resolve_tickets(ctx.issue_tracker.as_ref(), &keys).await;

    if enforce(ctx.policy.enforcement, &results) == GateDecision::Fail {
        return Err(AppError::NoVerifiedTickets);
    }

    let block = render(&results, &ctx.policy.markers);
    let body = merge(&pr.body, &block, &ctx.policy.markers)?;

    let update = if body == pr.body {
        info!("PR description already up to date");
        BodyUpdate::Unchanged
    } else if dry_run {
        info!("dry run: skipping PR description update");
        BodyUpdate::Skipped
    } else {
        info!("Updating PR description with Jira details...");
        ctx.code_host
            .update_pull_request_body(&pr.repository, pr.number, &body)
            .await?;
        BodyUpdate::Updated
    };

    Ok(CheckOutcome {
        results,
        body,
        update,
    })
}

/// Looks every key up concurrently; results come back in extraction order.
pub async fn resolve_tickets(
    tracker: &dyn IssueTrackerService,
    keys: &TicketKeySet,
) -> Vec<TicketLookup> {
    let lookups = keys.iter().map(|key| async move {
        let result = TicketLookup::from_outcome(key.clone(), tracker.fetch_ticket(key).await);
        match &result {
            TicketLookup::Verified { .. } => info!("Found Jira ticket: {}", result.key()),
            TicketLookup::Unverifiable { reason, .. } => {
                warn!("Could not fetch data for {}: {reason}", result.key())
            }
        }
        result
    });
    join_all(lookups).await
}

pub fn enforce(mode: EnforcementMode, results: &[TicketLookup]) -> GateDecision {
    match mode {
        EnforcementMode::Lenient => GateDecision::Pass,
        EnforcementMode::Strict if results.iter().any(TicketLookup::is_verified) => {
            GateDecision::Pass
        }
        EnforcementMode::Strict => GateDecision::Fail,
    }
}
