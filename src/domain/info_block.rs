use crate::domain::ticket::TicketLookup;
use crate::error::{AppError, AppResult};

pub const DEFAULT_MARKER_START: &str = "<!-- jira-tickets:start -->";
pub const DEFAULT_MARKER_END: &str = "<!-- jira-tickets:end -->";
const HEADING: &str = "### 🎫 Related Jira Tickets";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub start: String,
    pub end: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            start: DEFAULT_MARKER_START.to_string(),
            end: DEFAULT_MARKER_END.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoBlock(String);

impl InfoBlock {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn render(results: &[TicketLookup], markers: &Markers) -> InfoBlock {
    let list = results
        .iter()
        .map(|result| match result {
            TicketLookup::Verified { key, url, summary } => {
                format!("* [{key}]({url}) - {}\n", strip_markers(summary, markers))
            }
            TicketLookup::Unverifiable { key, .. } => format!("* {key} (could not fetch title)\n"),
        })
        .collect::<String>();

    InfoBlock(format!(
        "{}\n{HEADING}\n{list}{}",
        markers.start, markers.end
    ))
}

/// Summaries are remote text; a marker inside one would break the next merge.
fn strip_markers(text: &str, markers: &Markers) -> String {
    let mut clean = text.to_string();
    while clean.contains(&markers.start) || clean.contains(&markers.end) {
        clean = clean.replace(&markers.start, "").replace(&markers.end, "");
    }
    clean
}

/// Replaces the existing block in place, or prepends the block and a blank line.
///
/// A body may carry at most one block; anything else is rejected rather than
/// guessing which span belongs to this tool.
pub fn merge(body: &str, block: &InfoBlock, markers: &Markers) -> AppResult<String> {
    let starts = body.matches(markers.start.as_str()).count();
    let ends = body.matches(markers.end.as_str()).count();

    match (starts, ends) {
        (0, 0) => Ok(format!("{}\n\n{body}", block.as_str())),
        (1, 1) => {
            let (Some(start), Some(end)) = (
                body.find(markers.start.as_str()),
                body.find(markers.end.as_str()),
            ) else {
                return Err(AppError::MalformedInfoBlock(
                    "markers could not be located".to_string(),
                ));
            };
            if end < start + markers.start.len() {
                return Err(AppError::MalformedInfoBlock(
                    "end marker appears before start marker".to_string(),
                ));
            }
            let tail = end + markers.end.len();
            Ok(format!("{}{}{}", &body[..start], block.as_str(), &body[tail..]))
        }
        (0, _) => Err(AppError::MalformedInfoBlock(
            "end marker found without a start marker".to_string(),
        )),
        (_, 0) => Err(AppError::MalformedInfoBlock(
            "start marker found without an end marker".to_string(),
        )),
        _ => Err(AppError::MalformedInfoBlock(format!(
            "expected at most one block, found {starts} start and {ends} end markers"
        ))),
    }
}
