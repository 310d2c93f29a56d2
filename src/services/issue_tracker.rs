use async_trait::async_trait;

use crate::domain::ticket::{LookupFailure, TicketDetails, TicketKey};

#[async_trait]
pub trait IssueTrackerService: Send + Sync {
    /// A failed lookup is a value, never an abort of the run.
    async fn fetch_ticket(&self, key: &TicketKey) -> Result<TicketDetails, LookupFailure>;
}
