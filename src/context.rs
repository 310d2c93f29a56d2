use std::sync::Arc;

use crate::config::PolicyConfig;
use crate::services::{CodeHostService, IssueTrackerService};

#[derive(Clone)]
pub struct AppContext {
    pub policy: PolicyConfig,
    pub issue_tracker: Arc<dyn IssueTrackerService>,
    pub code_host: Arc<dyn CodeHostService>,
}

impl AppContext {
    pub fn new(
        policy: PolicyConfig,
        issue_tracker: Arc<dyn IssueTrackerService>,
        code_host: Arc<dyn CodeHostService>,
    ) -> Self {
        Self {
            policy,
            issue_tracker,
            code_host,
        }
    }
}
