//! Application state shared across handlers

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use scout_core::model::ChatModel;
use scout_core::AppConfig;

use crate::sessions::SessionStore;

/// Application state shared across handlers
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// Upstream chat model
    pub model: Arc<dyn ChatModel>,
    /// Session registry
    pub sessions: SessionStore,
    /// Server start time
    pub start_time: Instant,
    /// Request counter
    pub request_count: AtomicU64,
}

impl AppState {
    pub fn new(config: AppConfig, model: Arc<dyn ChatModel>) -> Self {
        Self {
            config,
            model,
            sessions: SessionStore::new(),
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
        }
    }

    /// Increment the request counter
    pub fn increment_requests(&self) -> u64 {
        self.request_count.fetch_add(1, Ordering::SeqCst)
    }

    /// Get total request count
    pub fn get_request_count(&self) -> u64 {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
