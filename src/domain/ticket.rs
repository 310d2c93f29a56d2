use std::fmt;
use std::sync::LazyLock;

use indexmap::IndexSet;
use regex::Regex;

pub static TICKET_KEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Z]+-[0-9]+").expect("ticket key pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TicketKey(String);

impl TicketKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ticket keys in the order they were first seen: title before branch.
pub type TicketKeySet = IndexSet<TicketKey>;

pub fn extract_keys(title: &str, branch: &str) -> TicketKeySet {
    [title, branch]
        .into_iter()
        .flat_map(|source| TICKET_KEY_PATTERN.find_iter(source))
        .map(|found| TicketKey(found.as_str().to_string()))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDetails {
    pub url: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupFailure {
    Status(u16),
    Transport(String),
    Parse(String),
}

impl fmt::Display for LookupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupFailure::Status(code) => write!(f, "HTTP {code}"),
            LookupFailure::Transport(reason) => write!(f, "connection error: {reason}"),
            LookupFailure::Parse(reason) => write!(f, "parse error: {reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketLookup {
    Verified {
        key: TicketKey,
        url: String,
        summary: String,
    },
    Unverifiable {
        key: TicketKey,
        reason: LookupFailure,
    },
}

impl TicketLookup {
    pub fn from_outcome(key: TicketKey, outcome: Result<TicketDetails, LookupFailure>) -> Self {
        match outcome {
            Ok(details) => TicketLookup::Verified {
                key,
                url: details.url,
                summary: details.summary,
            },
            Err(reason) => TicketLookup::Unverifiable { key, reason },
        }
    }

    pub fn key(&self) -> &TicketKey {
        match self {
            TicketLookup::Verified { key, .. } | TicketLookup::Unverifiable { key, .. } => key,
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, TicketLookup::Verified { .. })
    }
}

#[cfg(test)]
pub(crate) fn key(value: &str) -> TicketKey {
    TicketKey(value.to_string())
}
