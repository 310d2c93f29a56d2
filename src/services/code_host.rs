use async_trait::async_trait;

use crate::domain::pull_request::RepositoryName;
use crate::error::AppResult;

#[async_trait]
pub trait CodeHostService: Send + Sync {
    async fn update_pull_request_body(
        &self,
        repository: &RepositoryName,
        number: u64,
        body: &str,
    ) -> AppResult<()>;
}
