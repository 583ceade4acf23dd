//! Repository trait for the shared relay state.
//!
//! The registry and the history buffer are the only shared mutable state of
//! the relay. Use cases reach them through this trait. Single-step calls take
//! the lock internally; multi-step sequences hold the guard from `lock`.

use async_trait::async_trait;
use tokio::sync::MutexGuard;

use super::{
    entity::Session,
    state::RelayState,
    value_object::{SessionId, Timestamp},
};

/// Point-in-time counters of the relay state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RelayStats {
    pub connections: usize,
    pub authenticated: usize,
    pub history: usize,
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Register a new, unauthenticated session
    async fn admit(&self, connected_at: Timestamp) -> SessionId;

    /// Drop the session and its name binding (idempotent)
    async fn remove(&self, session_id: SessionId) -> Option<Session>;

    /// Number of live sessions
    async fn count_sessions(&self) -> usize;

    async fn stats(&self) -> RelayStats;

    /// Exclusive access to the relay state until the guard is dropped.
    ///
    /// Notifications that must stay ordered with the state change are queued
    /// while the guard is held.
    async fn lock(&self) -> MutexGuard<'_, RelayState>;
}
