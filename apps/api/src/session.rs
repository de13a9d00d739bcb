//! Session State: the latest generation results per interactive session.
//!
//! Results live in memory only and are replaced wholesale by each successful
//! generation. A session that never generated is absent, which is distinct
//! from a session whose last generation produced an empty list.
//!
//! The store holds at most `capacity` sessions; storing results for a new
//! session when full evicts the one that generated least recently.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

pub const DEFAULT_MAX_SESSIONS: usize = 64;

#[derive(Debug, Clone, Serialize)]
pub struct SessionResults {
    pub prompts: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Default)]
struct Sessions {
    entries: HashMap<Uuid, (u64, SessionResults)>,
    // Monotonic generation counter; the smallest value is evicted first.
    next_seq: u64,
}

#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<Sessions>>,
    capacity: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_SESSIONS)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Sessions::default())),
            capacity: capacity.max(1),
        }
    }

    /// Stores `prompts` as the session's results, dropping whatever was there.
    pub async fn replace(&self, session_id: Uuid, prompts: Vec<String>) -> SessionResults {
        let results = SessionResults {
            prompts,
            generated_at: Utc::now(),
        };

        let mut sessions = self.inner.write().await;
        if !sessions.entries.contains_key(&session_id) && sessions.entries.len() >= self.capacity {
            let oldest = sessions
                .entries
                .iter()
                .min_by_key(|(_, (seq, _))| *seq)
                .map(|(id, _)| *id);
            if let Some(oldest) = oldest {
                sessions.entries.remove(&oldest);
                debug!("Evicted session {oldest}");
            }
        }

        let seq = sessions.next_seq;
        sessions.next_seq += 1;
        sessions
            .entries
            .insert(session_id, (seq, results.clone()));
        results
    }

    pub async fn get(&self, session_id: Uuid) -> Option<SessionResults> {
        self.inner
            .read()
            .await
            .entries
            .get(&session_id)
            .map(|(_, results)| results.clone())
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }
}
