//! Configuration management
//!
//! Loads configuration from environment variables with sensible
//! development defaults. Only the Gemini API key is mandatory.

use thiserror::Error;

/// Main application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Gemini upstream configuration
    pub gemini: GeminiConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server bind configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Gemini upstream configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key, from `GOOGLE_API_KEY` or `GEMINI_API_KEY`
    pub api_key: String,

    /// Optional model override; the client falls back to its default
    /// model identifier when this is `None`.
    pub model: Option<String>,

    /// Deployment mode flag, informational only
    pub mode: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: None,
            mode: "development".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Set GOOGLE_API_KEY or GEMINI_API_KEY in the environment")]
    MissingApiKey,

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Fails if no API key is resolvable; everything else falls back to
    /// defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Server
        if let Some(host) = env_non_empty("API_HOST") {
            config.server.host = host;
        }
        if let Some(port) = env_non_empty("API_PORT") {
            config.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "API_PORT".to_string(),
                value: port,
            })?;
        }

        // Gemini
        config.gemini.api_key = env_non_empty("GOOGLE_API_KEY")
            .or_else(|| env_non_empty("GEMINI_API_KEY"))
            .ok_or(ConfigError::MissingApiKey)?;
        config.gemini.model = env_non_empty("GEMINI_MODEL");
        if let Some(mode) = env_non_empty("APP_ENV") {
            config.gemini.mode = mode;
        }

        // Logging
        if let Some(level) = env_non_empty("LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(config)
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
