//! In-memory session repository.
//!
//! The registry and the history buffer live behind a single mutex. Pushing a
//! notification under the guard only queues it on a channel; socket writes
//! happen in the connection's own task.

use async_trait::async_trait;
use tokio::sync::{Mutex, MutexGuard};

use crate::domain::{
    HistoryBuffer, RelayState, RelayStats, Session, SessionId, SessionRepository, Timestamp,
};

#[derive(Debug, Default)]
pub struct InMemorySessionRepository {
    state: Mutex<RelayState>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(history: HistoryBuffer) -> Self {
        Self {
            state: Mutex::new(RelayState::with_history(history)),
        }
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn admit(&self, connected_at: Timestamp) -> SessionId {
        self.state.lock().await.registry.admit(connected_at)
    }

    async fn remove(&self, session_id: SessionId) -> Option<Session> {
        self.state.lock().await.registry.remove(session_id)
    }

    async fn count_sessions(&self) -> usize {
        self.state.lock().await.registry.count()
    }

    async fn stats(&self) -> RelayStats {
        self.state.lock().await.stats()
    }

    async fn lock(&self) -> MutexGuard<'_, RelayState> {
        self.state.lock().await
    }
}
