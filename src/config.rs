use std::time::Duration;

use clap::{Args, ValueEnum};

use crate::domain::info_block::{DEFAULT_MARKER_END, DEFAULT_MARKER_START, Markers};
use crate::domain::pull_request::{PullRequestContext, RepositoryName};
use crate::domain::title::DEFAULT_MIN_DESCRIPTION_LENGTH;
use crate::error::{AppError, AppResult};

const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EnforcementMode {
    /// Unverifiable tickets are listed but never fail the check.
    Lenient,
    /// Fail when no referenced ticket can be verified.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum JiraAuthMode {
    Bearer,
    Basic,
}

/// Raw inputs as handed over by the CI runner, either as flags or environment.
#[derive(Args, Debug, Clone, Default)]
pub struct Settings {
    /// Jira host (e.g. company.atlassian.net) or full base URL.
    #[arg(long, env = "JIRA_DOMAIN")]
    pub jira_domain: Option<String>,
    /// Jira API token.
    #[arg(long, env = "JIRA_TOKEN", hide_env_values = true)]
    pub jira_token: Option<String>,
    /// Jira user, required for basic authentication.
    #[arg(long, env = "JIRA_USER")]
    pub jira_user: Option<String>,
    #[arg(long, env = "JIRA_AUTH_MODE", value_enum)]
    pub jira_auth: Option<JiraAuthMode>,
    /// GitHub token used to update the pull request.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,
    #[arg(long, env = "GITHUB_API_URL")]
    pub github_api_url: Option<String>,
    /// Repository in owner/name form.
    #[arg(long, env = "REPO_FULL_NAME")]
    pub repo: Option<String>,
    #[arg(long, env = "PR_NUMBER")]
    pub pr_number: Option<u64>,
    #[arg(long, env = "PR_TITLE")]
    pub pr_title: Option<String>,
    #[arg(long, env = "BRANCH_NAME")]
    pub branch: Option<String>,
    /// Current pull request description; empty when unset.
    #[arg(long, env = "PR_BODY_INPUT")]
    pub pr_body: Option<String>,
    #[arg(long, env = "ENFORCEMENT_MODE", value_enum)]
    pub enforcement: Option<EnforcementMode>,
    /// Minimum title length once ticket keys and brackets are removed.
    #[arg(long)]
    pub min_title_length: Option<usize>,
    #[arg(long)]
    pub request_timeout_secs: Option<u64>,
    #[arg(long)]
    pub marker_start: Option<String>,
    #[arg(long)]
    pub marker_end: Option<String>,
}

#[derive(Debug, Clone)]
pub enum JiraAuth {
    Bearer { token: String },
    Basic { user: String, token: String },
}

#[derive(Debug, Clone)]
pub struct JiraConfig {
    pub base_url: String,
    pub auth: JiraAuth,
}

#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub api_url: String,
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct PolicyConfig {
    pub enforcement: EnforcementMode,
    pub min_title_length: usize,
    pub markers: Markers,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jira: JiraConfig,
    pub github: GitHubConfig,
    pub policy: PolicyConfig,
    pub request_timeout: Duration,
}

impl Settings {
    pub fn auth_mode(&self) -> JiraAuthMode {
        self.jira_auth.unwrap_or(JiraAuthMode::Basic)
    }

    pub fn enforcement_mode(&self) -> EnforcementMode {
        self.enforcement.unwrap_or(EnforcementMode::Strict)
    }

    pub fn jira_base_url(&self) -> Option<String> {
        self.jira_domain
            .as_deref()
            .map(str::trim)
            .filter(|domain| !domain.is_empty())
            .map(normalize_base_url)
    }

    pub fn markers(&self) -> Markers {
        Markers {
            start: self
                .marker_start
                .clone()
                .unwrap_or_else(|| DEFAULT_MARKER_START.to_string()),
            end: self
                .marker_end
                .clone()
                .unwrap_or_else(|| DEFAULT_MARKER_END.to_string()),
        }
    }
}

impl AppConfig {
    pub fn from_settings(settings: &Settings) -> AppResult<Self> {
        let base_url = settings
            .jira_base_url()
            .ok_or_else(|| missing("Jira domain", "JIRA_DOMAIN"))?;
        let jira_token = required(&settings.jira_token, "Jira token", "JIRA_TOKEN")?;
        let auth = match settings.auth_mode() {
            JiraAuthMode::Bearer => JiraAuth::Bearer { token: jira_token },
            JiraAuthMode::Basic => JiraAuth::Basic {
                user: required(&settings.jira_user, "Jira user", "JIRA_USER")?,
                token: jira_token,
            },
        };

        let github_token = required(&settings.github_token, "GitHub token", "GITHUB_TOKEN")?;
        let api_url = settings
            .github_api_url
            .as_deref()
            .unwrap_or(DEFAULT_GITHUB_API_URL)
            .trim_end_matches('/')
            .to_string();

        let markers = settings.markers();
        validate_markers(&markers)?;

        let timeout_secs = settings.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(AppError::Configuration(
                "request timeout must be at least one second".to_string(),
            ));
        }

        Ok(Self {
            jira: JiraConfig { base_url, auth },
            github: GitHubConfig {
                api_url,
                token: github_token,
            },
            policy: PolicyConfig {
                enforcement: settings.enforcement_mode(),
                min_title_length: settings
                    .min_title_length
                    .unwrap_or(DEFAULT_MIN_DESCRIPTION_LENGTH),
                markers,
            },
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl PullRequestContext {
    pub fn from_settings(settings: &Settings) -> AppResult<Self> {
        let repo = required(&settings.repo, "repository", "REPO_FULL_NAME")?;
        let number = settings
            .pr_number
            .ok_or_else(|| missing("pull request number", "PR_NUMBER"))?;

        Ok(Self {
            repository: RepositoryName::parse(&repo)?,
            number,
            title: required(&settings.pr_title, "pull request title", "PR_TITLE")?,
            branch: required(&settings.branch, "branch name", "BRANCH_NAME")?,
            body: settings.pr_body.clone().unwrap_or_default(),
        })
    }
}

fn normalize_base_url(domain: &str) -> String {
    let trimmed = domain.trim_end_matches('/');
    if trimmed.starts_with("https://") || trimmed.starts_with("http://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

fn validate_markers(markers: &Markers) -> AppResult<()> {
    if markers.start.is_empty() || markers.end.is_empty() {
        return Err(AppError::Configuration(
            "block markers must not be empty".to_string(),
        ));
    }
    if markers.start.contains(&markers.end) || markers.end.contains(&markers.start) {
        return Err(AppError::Configuration(
            "block start and end markers must be distinct".to_string(),
        ));
    }
    Ok(())
}

fn required(value: &Option<String>, label: &str, env: &str) -> AppResult<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| missing(label, env))
}

fn missing(label: &str, env: &str) -> AppError {
    AppError::Configuration(format!("{label} not configured (set {env})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_settings() -> Settings {
        Settings {
            jira_domain: Some("jira.example.com".to_string()),
            jira_token: Some("jira-secret".to_string()),
            jira_user: Some("bot@example.com".to_string()),
            github_token: Some("gh-secret".to_string()),
            repo: Some("acme/widgets".to_string()),
            pr_number: Some(7),
            pr_title: Some("PROJ-42 add caching".to_string()),
            branch: Some("main".to_string()),
            ..Settings::default()
        }
    }

    #[test]
    fn builds_config_with_defaults() {
        let config = AppConfig::from_settings(&complete_settings()).unwrap();
        assert_eq!(config.jira.base_url, "https://jira.example.com");
        assert!(matches!(config.jira.auth, JiraAuth::Basic { .. }));
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.policy.enforcement, EnforcementMode::Strict);
        assert_eq!(config.policy.min_title_length, 10);
        assert_eq!(config.policy.markers, Markers::default());
        assert_eq!(config.request_timeout, Duration::from_secs(15));
    }

    #[test]
    fn keeps_explicit_base_url() {
        let settings = Settings {
            jira_domain: Some("https://jira.example.com/".to_string()),
            ..complete_settings()
        };
        let config = AppConfig::from_settings(&settings).unwrap();
        assert_eq!(config.jira.base_url, "https://jira.example.com");
    }

    #[test]
    fn bearer_auth_does_not_need_user() {
        let settings = Settings {
            jira_auth: Some(JiraAuthMode::Bearer),
            jira_user: None,
            ..complete_settings()
        };
        let config = AppConfig::from_settings(&settings).unwrap();
        assert!(matches!(config.jira.auth, JiraAuth::Bearer { ref token } if token == "jira-secret"));
    }

    #[test]
    fn basic_auth_requires_user() {
        let settings = Settings {
            jira_user: None,
            ..complete_settings()
        };
        let err = AppConfig::from_settings(&settings).unwrap_err();
        assert!(err.to_string().contains("JIRA_USER"));
    }

    #[test]
    fn rejects_overlapping_markers() {
        let settings = Settings {
            marker_start: Some("<!-- x -->".to_string()),
            marker_end: Some("-->".to_string()),
            ..complete_settings()
        };
        assert!(AppConfig::from_settings(&settings).is_err());
    }

    #[test]
    fn pull_request_body_defaults_to_empty() {
        let context = PullRequestContext::from_settings(&complete_settings()).unwrap();
        assert_eq!(context.body, "");
        assert_eq!(context.number, 7);
        assert_eq!(context.repository.to_string(), "acme/widgets");
    }

    #[test]
    fn pull_request_requires_title() {
        let settings = Settings {
            pr_title: Some("   ".to_string()),
            ..complete_settings()
        };
        let err = PullRequestContext::from_settings(&settings).unwrap_err();
        assert!(err.to_string().contains("PR_TITLE"));
    }
}
