//! Shared relay state: the session registry and the broadcast history.
//!
//! Both live behind one lock. Every operation that reads one and writes the
//! other is a single method here, so a caller holding the lock sees it as one
//! step.

use super::{
    entity::ChatMessage,
    error::RegistryError,
    history::HistoryBuffer,
    registry::SessionRegistry,
    repository::RelayStats,
    value_object::{DisplayName, MessageContent, SessionId, Timestamp},
};

#[derive(Debug, Default)]
pub struct RelayState {
    pub registry: SessionRegistry,
    pub history: HistoryBuffer,
}

impl RelayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(history: HistoryBuffer) -> Self {
        Self {
            registry: SessionRegistry::new(),
            history,
        }
    }

    /// Bind `name` to the session and take the replay snapshot.
    ///
    /// The snapshot holds the last `replay_len` broadcasts recorded before the
    /// bind. Every later broadcast counts the session as a target.
    pub fn authenticate_and_snapshot(
        &mut self,
        session_id: SessionId,
        name: DisplayName,
        replay_len: usize,
    ) -> Result<Vec<ChatMessage>, RegistryError> {
        self.registry.authenticate(session_id, name)?;
        Ok(self.history.recent_up_to(replay_len))
    }

    /// Stamp a broadcast from `from`, append it to history and pick its targets.
    ///
    /// Targets are the authenticated sessions other than the sender.
    pub fn record_broadcast(
        &mut self,
        from: SessionId,
        content: MessageContent,
        timestamp: Timestamp,
    ) -> (ChatMessage, Vec<SessionId>) {
        let message =
            ChatMessage::broadcast(self.registry.sender_name(from), content, timestamp);
        self.history.append(message.clone());
        (message, self.registry.authenticated_except(from))
    }

    pub fn stats(&self) -> RelayStats {
        RelayStats {
            connections: self.registry.count(),
            authenticated: self.registry.authenticated_count(),
            history: self.history.len(),
        }
    }
}
