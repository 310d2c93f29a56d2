use std::fmt;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName {
    pub owner: String,
    pub name: String,
}

impl RepositoryName {
    pub fn parse(full_name: &str) -> AppResult<Self> {
        let trimmed = full_name.trim();
        match trimmed.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(AppError::Configuration(format!(
                "repository must be in owner/name form, got '{trimmed}'"
            ))),
        }
    }
}

impl fmt::Display for RepositoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Snapshot of the pull request under check, read once at startup.
#[derive(Debug, Clone)]
pub struct PullRequestContext {
    pub repository: RepositoryName,
    pub number: u64,
    pub title: String,
    pub branch: String,
    pub body: String,
}
