//! UseCase: admit a new connection.

use std::sync::Arc;

use chatrelay_shared::time::Clock;

use crate::domain::{
    MessagePusher, Notification, PusherChannel, SessionId, SessionRepository, Timestamp,
};

pub struct ConnectSessionUseCase {
    repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl ConnectSessionUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    /// Admit the connection as an unauthenticated session and ask it for a name.
    ///
    /// # Arguments
    ///
    /// * `sender` - Outbound queue of the connection
    pub async fn execute(&self, sender: PusherChannel) -> SessionId {
        let connected_at = Timestamp::new(self.clock.now_millis());
        let session_id = self.repository.admit(connected_at).await;
        self.message_pusher
            .register_client(session_id, sender)
            .await;

        tracing::info!(
            "Session '{}' connected. Total clients: {}",
            session_id,
            self.repository.count_sessions().await
        );

        if let Err(e) = self
            .message_pusher
            .push_to(session_id, &Notification::AuthRequest)
            .await
        {
            tracing::warn!("Failed to send auth request to '{}': {}", session_id, e);
        }

        session_id
    }
}
