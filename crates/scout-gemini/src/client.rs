//! Gemini `generateContent` client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use scout_core::grounding::GroundingMetadata;
use scout_core::model::{ChatModel, ChatSession, Content, GroundingMode, ModelReply, Role};
use scout_core::{retry, GeminiConfig, Result, ScoutError};

/// Model used when the configuration carries no override.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini API client
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a new client from configuration.
    pub fn new(config: &GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }

    /// Set a custom base URL (for proxies or tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<WireContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct WireContent<'a> {
    role: &'static str,
    parts: Vec<WirePart<'a>>,
}

#[derive(Debug, Serialize)]
struct WirePart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.9,
            top_p: 1.0,
            top_k: 1,
            max_output_tokens: 2048,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Candidate {
    content: Option<CandidateContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidatePart {
    text: Option<String>,
}

/// Google API error envelope: `{"error": {"code", "message", "status"}}`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
#[allow(dead_code)]
struct ErrorBody {
    code: Option<u16>,
    message: String,
    status: String,
}

fn wire_content(content: &Content) -> WireContent<'_> {
    WireContent {
        role: match content.role {
            Role::User => "user",
            Role::Model => "model",
        },
        parts: content
            .parts
            .iter()
            .map(|text| WirePart { text })
            .collect(),
    }
}

// ============================================================================
// Error normalization
// ============================================================================

/// Accept a status candidate only in the error range.
fn coerce_status(http_status: u16, body_code: Option<u16>) -> Option<u16> {
    [Some(http_status), body_code]
        .into_iter()
        .flatten()
        .find(|code| (400..=599).contains(code))
}

/// Turn a non-success upstream response into a classified error.
///
/// Rate limits become `RateLimited` with a best-effort delay parsed from
/// the error message (or the raw body, where Google nests a
/// `retryDelay` detail). Everything else is `Upstream` with the coerced
/// status.
fn upstream_error(http_status: u16, body: &str) -> ScoutError {
    let envelope: ErrorEnvelope = serde_json::from_str(body).unwrap_or_default();
    let message = if envelope.error.message.is_empty() {
        format!("Gemini API returned HTTP {http_status}")
    } else {
        envelope.error.message
    };

    let status = coerce_status(http_status, envelope.error.code);
    if status == Some(429) {
        let retry_after_seconds =
            retry::retry_after_seconds(&message).or_else(|| retry::retry_after_seconds(body));
        ScoutError::RateLimited {
            message,
            retry_after_seconds,
        }
    } else {
        ScoutError::Upstream { status, message }
    }
}

fn transport_error(err: reqwest::Error) -> ScoutError {
    let status = err
        .status()
        .map(|s| s.as_u16())
        .filter(|code| (400..=599).contains(code));
    ScoutError::Upstream {
        status,
        message: format!("Request to Gemini failed: {err}"),
    }
}

// ============================================================================
// ChatModel implementation
// ============================================================================

#[async_trait]
impl ChatModel for GeminiClient {
    fn start_chat(&self, grounding: GroundingMode) -> ChatSession {
        ChatSession::new(grounding)
    }

    async fn send_message(&self, session: &mut ChatSession, message: &str) -> Result<ModelReply> {
        let user_turn = Content::user(message);

        let mut contents: Vec<WireContent> = session.history().iter().map(wire_content).collect();
        contents.push(wire_content(&user_turn));

        let request = GenerateContentRequest {
            contents,
            tools: match session.grounding() {
                GroundingMode::Grounded => Some(vec![Tool {
                    google_search: GoogleSearch {},
                }]),
                GroundingMode::Ungrounded => None,
            },
            generation_config: GenerationConfig::default(),
        };

        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model
        );
        tracing::debug!(model = %self.model, grounding = ?session.grounding(), "sending message");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let http_status = response.status();
        if !http_status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(upstream_error(http_status.as_u16(), &body));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(transport_error)?;
        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| ScoutError::Upstream {
                status: None,
                message: "Gemini response contained no candidates".to_string(),
            })?;

        let text = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ScoutError::Upstream {
                status: None,
                message: "Gemini reply contained no text".to_string(),
            });
        }

        session.push(user_turn);
        session.push(Content::model(text.clone()));

        Ok(ModelReply {
            text,
            grounding_metadata: candidate.grounding_metadata,
        })
    }
}
