pub mod code_host;
pub mod issue_tracker;

pub use code_host::CodeHostService;
pub use issue_tracker::IssueTrackerService;
