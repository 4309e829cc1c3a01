//! In-memory session registry
//!
//! Maps short session identifiers to live chat sessions. The registry is
//! owned by the application state rather than living in a module-level
//! singleton, but entries are still immortal: there is no eviction, no
//! expiry, and no delete. Unbounded growth over the process lifetime is an
//! accepted limitation.

use std::collections::HashMap;
use std::sync::Arc;

use rand::Rng;
use tokio::sync::{Mutex, RwLock};

use scout_core::model::ChatSession;

const SESSION_ID_LEN: usize = 8;
const SESSION_ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Process-wide session registry.
///
/// The outer lock guards map membership; the per-session mutex serializes
/// concurrent sends on one conversational handle.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<Mutex<ChatSession>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session and return its generated identifier.
    ///
    /// Identifiers are probabilistically unique; at 8 base-36 characters a
    /// collision over realistic session counts is negligible and not
    /// guarded against.
    pub async fn create(&self, session: ChatSession) -> String {
        let id = generate_session_id();
        self.sessions
            .write()
            .await
            .insert(id.clone(), Arc::new(Mutex::new(session)));
        id
    }

    pub async fn get(&self, id: &str) -> Option<Arc<Mutex<ChatSession>>> {
        self.sessions.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn generate_session_id() -> String {
    let mut rng = rand::thread_rng();
    (0..SESSION_ID_LEN)
        .map(|_| SESSION_ID_ALPHABET[rng.gen_range(0..SESSION_ID_ALPHABET.len())] as char)
        .collect()
}
