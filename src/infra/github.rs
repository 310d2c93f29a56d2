use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT},
};
use serde::Serialize;

use crate::config::GitHubConfig;
use crate::domain::pull_request::RepositoryName;
use crate::error::{AppError, AppResult};
use crate::services::CodeHostService;

const CLIENT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub struct GitHubClient {
    http: Client,
    api_url: String,
    token: String,
}

impl GitHubClient {
    pub fn new(config: &GitHubConfig, timeout: Duration) -> AppResult<Self> {
        let http = Client::builder().timeout(timeout).build().map_err(|err| {
            AppError::Configuration(format!("failed to build GitHub client: {err}"))
        })?;
        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            token: config.token.clone(),
        })
    }

    fn pull_request_endpoint(api_url: &str, repository: &RepositoryName, number: u64) -> String {
        format!(
            "{}/repos/{}/{}/pulls/{}",
            api_url.trim_end_matches('/'),
            repository.owner,
            repository.name,
            number
        )
    }
}

#[async_trait]
impl CodeHostService for GitHubClient {
    async fn update_pull_request_body(
        &self,
        repository: &RepositoryName,
        number: u64,
        body: &str,
    ) -> AppResult<()> {
        let response = self
            .http
            .patch(Self::pull_request_endpoint(&self.api_url, repository, number))
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, "application/vnd.github.v3+json")
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .json(&UpdatePullRequest { body })
            .send()
            .await
            .map_err(|err| AppError::CodeHost(format!("failed to call GitHub: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::CodeHost(format!(
                "GitHub responded with {status}: {body}"
            )));
        }

        Ok(())
    }
}

#[derive(Serialize)]
struct UpdatePullRequest<'a> {
    body: &'a str,
}
