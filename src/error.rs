use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("no Jira ticket key found in title or branch name")]
    NoTicketKeys,
    #[error("PR title description is too short ({length} chars); must be at least {minimum}")]
    TitleTooShort { length: usize, minimum: usize },
    #[error("none of the referenced Jira tickets could be verified")]
    NoVerifiedTickets,
    #[error("malformed ticket block in PR body: {0}")]
    MalformedInfoBlock(String),
    #[error("code host error: {0}")]
    CodeHost(String),
}

pub type AppResult<T> = Result<T, AppError>;
