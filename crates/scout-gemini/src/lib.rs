//! Gemini API client
//!
//! Implements the `ChatModel` trait over the Gemini `generateContent` REST
//! endpoint, with optional Google Search grounding. Upstream failures are
//! normalized into `ScoutError` variants here, at the client boundary.

mod client;

pub use client::{GeminiClient, DEFAULT_MODEL};
