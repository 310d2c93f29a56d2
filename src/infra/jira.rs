use std::time::Duration;

use async_trait::async_trait;
use base64::prelude::{BASE64_STANDARD, Engine as _};
use reqwest::{
    Client,
    header::{ACCEPT, AUTHORIZATION},
};
use serde::Deserialize;

use crate::config::{JiraAuth, JiraConfig};
use crate::domain::ticket::{LookupFailure, TicketDetails, TicketKey};
use crate::error::{AppError, AppResult};
use crate::services::IssueTrackerService;

pub struct JiraClient {
    http: Client,
    base_url: String,
    auth: JiraAuth,
}

impl JiraClient {
    pub fn new(config: &JiraConfig, timeout: Duration) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AppError::Configuration(format!("failed to build Jira client: {err}")))?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            auth: config.auth.clone(),
        })
    }

    fn auth_header(auth: &JiraAuth) -> String {
        match auth {
            JiraAuth::Bearer { token } => format!("Bearer {token}"),
            JiraAuth::Basic { user, token } => {
                let credentials = format!("{user}:{token}");
                let encoded = BASE64_STANDARD.encode(credentials);
                format!("Basic {encoded}")
            }
        }
    }

    fn issue_endpoint(base_url: &str, key: &TicketKey) -> String {
        format!(
            "{}/rest/api/3/issue/{}",
            base_url.trim_end_matches('/'),
            key.as_str()
        )
    }

    fn browse_url(base_url: &str, key: &TicketKey) -> String {
        format!("{}/browse/{}", base_url.trim_end_matches('/'), key)
    }

    fn parse_summary(payload: &str) -> Result<String, LookupFailure> {
        serde_json::from_str::<JiraIssueResponse>(payload)
            .map(|issue| issue.fields.summary)
            .map_err(|err| LookupFailure::Parse(err.to_string()))
    }
}

#[async_trait]
impl IssueTrackerService for JiraClient {
    async fn fetch_ticket(&self, key: &TicketKey) -> Result<TicketDetails, LookupFailure> {
        let response = self
            .http
            .get(Self::issue_endpoint(&self.base_url, key))
            .header(AUTHORIZATION, Self::auth_header(&self.auth))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| LookupFailure::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupFailure::Status(status.as_u16()));
        }

        let payload = response
            .text()
            .await
            .map_err(|err| LookupFailure::Transport(err.to_string()))?;
        let summary = Self::parse_summary(&payload)?;

        Ok(TicketDetails {
            url: Self::browse_url(&self.base_url, key),
            summary,
        })
    }
}

#[derive(Deserialize)]
struct JiraIssueResponse {
    fields: JiraIssueFields,
}

#[derive(Deserialize)]
struct JiraIssueFields {
    summary: String,
}
