//! API request handlers

pub mod follow_up;
pub mod health;
pub mod search;

use scout_core::model::{ModelReply, Source};
use scout_core::extract_sources;

use crate::format::format_response;

/// Shared tail of both answer endpoints: render the reply text to HTML
/// and pull cited sources out of any grounding metadata.
fn render_reply(reply: &ModelReply) -> (String, Vec<Source>) {
    let summary = format_response(&reply.text);
    let sources = extract_sources(reply.grounding_metadata.as_ref());
    (summary, sources)
}

/// Treat missing, empty, and whitespace-only parameters alike.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
