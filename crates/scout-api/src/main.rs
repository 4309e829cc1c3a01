//! Scout API server
//!
//! HTTP backend proxying the Gemini chat/search API: HTML-formatted
//! answers, citation sources, and short-lived conversational sessions.

use std::sync::Arc;

use scout_api::{create_router, AppState};
use scout_core::model::ChatModel;
use scout_core::AppConfig;
use scout_gemini::GeminiClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Best-effort .env loading; plain environment variables are enough.
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scout_api=debug,tower_http=debug".into()),
        )
        .init();

    // Load configuration; a missing API key is fatal.
    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let client = GeminiClient::new(&config.gemini);
    tracing::info!(model = client.model(), mode = %config.gemini.mode, "configured Gemini upstream");
    let model: Arc<dyn ChatModel> = Arc::new(client);

    // Create application state and router
    let state = Arc::new(AppState::new(config, model));
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("scout API server starting on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
