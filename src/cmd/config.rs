use crate::config::{JiraAuthMode, Settings};
use crate::error::AppResult;

/// Prints what the check would run with, secrets masked.
pub fn run(settings: &Settings) -> AppResult<()> {
    println!(
        "Jira base URL: {}",
        display_value(&settings.jira_base_url())
    );
    println!("Jira auth: {:?}", settings.auth_mode());
    if settings.auth_mode() == JiraAuthMode::Basic {
        println!("Jira user: {}", display_value(&settings.jira_user));
    }
    println!("Jira token: {}", mask_secret(&settings.jira_token));
    println!("GitHub token: {}", mask_secret(&settings.github_token));
    println!(
        "GitHub API URL: {}",
        display_value(&settings.github_api_url)
    );
    println!("Repository: {}", display_value(&settings.repo));
    println!(
        "Pull request: {}",
        settings
            .pr_number
            .map(|n| format!("#{n}"))
            .unwrap_or_else(|| "<not set>".to_string())
    );
    println!("Title: {}", display_value(&settings.pr_title));
    println!("Branch: {}", display_value(&settings.branch));
    println!("Enforcement: {:?}", settings.enforcement_mode());

    let markers = settings.markers();
    println!("Block markers: {} / {}", markers.start, markers.end);

    Ok(())
}

fn display_value(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

fn mask_secret(value: &Option<String>) -> String {
    match value {
        Some(token) if token.chars().count() > 6 => {
            let chars: Vec<char> = token.chars().collect();
            let prefix: String = chars[..3].iter().collect();
            let suffix: String = chars[chars.len() - 3..].iter().collect();
            format!("{prefix}***{suffix}")
        }
        Some(token) if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}
