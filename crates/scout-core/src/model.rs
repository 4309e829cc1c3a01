//! Chat session model and the upstream client trait

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::grounding::GroundingMetadata;
use crate::Result;

/// Whether a session was established with the search-grounding tool.
///
/// Resolved once, at session creation: a search request first tries a
/// grounded chat and falls back to an ungrounded one. Follow-ups reuse
/// whatever mode the session was created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroundingMode {
    Grounded,
    Ungrounded,
}

/// Conversation turn author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One conversation turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub role: Role,
    pub parts: Vec<String>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            parts: vec![text.into()],
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            parts: vec![text.into()],
        }
    }
}

/// An in-flight conversation: the accumulated turn history plus the
/// grounding mode it was created with.
///
/// The history is only ever appended to, and only by `send_message`.
#[derive(Debug, Clone)]
pub struct ChatSession {
    grounding: GroundingMode,
    history: Vec<Content>,
}

impl ChatSession {
    pub fn new(grounding: GroundingMode) -> Self {
        Self {
            grounding,
            history: Vec::new(),
        }
    }

    pub fn grounding(&self) -> GroundingMode {
        self.grounding
    }

    pub fn history(&self) -> &[Content] {
        &self.history
    }

    pub fn push(&mut self, content: Content) {
        self.history.push(content);
    }
}

/// A single model reply: the raw answer text plus any grounding metadata
/// the upstream attached to it.
#[derive(Debug, Clone, Default)]
pub struct ModelReply {
    pub text: String,
    pub grounding_metadata: Option<GroundingMetadata>,
}

/// A citation surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub url: String,
    /// Concatenation of all supporting text segments referencing this
    /// source; may be empty.
    pub snippet: String,
}

/// Boundary to the upstream generative model.
///
/// Implementations are expected to normalize their failures into
/// [`ScoutError::RateLimited`](crate::ScoutError::RateLimited) /
/// [`ScoutError::Upstream`](crate::ScoutError::Upstream) so handlers never
/// see transport-specific error types.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Begin a new conversation in the given grounding mode.
    fn start_chat(&self, grounding: GroundingMode) -> ChatSession;

    /// Send one user message on the session, appending both the user turn
    /// and the model's reply to its history.
    async fn send_message(&self, session: &mut ChatSession, message: &str) -> Result<ModelReply>;
}
