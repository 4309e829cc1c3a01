//! Scout Core - Domain types, traits, and shared infrastructure
//!
//! This crate defines the core abstractions used throughout the scout system:
//! - Chat session and grounding models
//! - Common error types
//! - The `ChatModel` trait implemented by upstream clients
//! - Configuration management
//! - Retry-hint parsing for upstream rate limits

pub mod config;
pub mod grounding;
pub mod model;
pub mod retry;

pub use config::{AppConfig, ConfigError, GeminiConfig, ServerConfig};
pub use grounding::{extract_sources, GroundingChunk, GroundingMetadata, GroundingSupport};
pub use model::{ChatModel, ChatSession, Content, GroundingMode, ModelReply, Role, Source};

use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for scout operations
///
/// Upstream failures are normalized into `RateLimited`/`Upstream` at the
/// client boundary so that handlers can match on variants instead of
/// probing an opaque error value.
#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    RateLimited {
        message: String,
        retry_after_seconds: Option<u64>,
    },

    #[error("{message}")]
    Upstream {
        /// Upstream HTTP status, when one in [400, 599] could be recovered.
        status: Option<u16>,
        message: String,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScoutError {
    /// The HTTP status this error maps to at the API boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::RateLimited { .. } => 429,
            Self::Upstream { status, .. } => status.unwrap_or(500),
            Self::Config(_) | Self::Other(_) => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScoutError>;
