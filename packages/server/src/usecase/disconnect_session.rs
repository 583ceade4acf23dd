//! UseCase: tear down a closed connection.

use std::sync::Arc;

use crate::domain::{MessagePusher, SessionId, SessionRepository};

pub struct DisconnectSessionUseCase {
    repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectSessionUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Remove the session and its name binding.
    ///
    /// Idempotent. Returns the number of sessions still connected.
    pub async fn execute(&self, session_id: SessionId) -> usize {
        self.message_pusher.unregister_client(session_id).await;
        let removed = self.repository.remove(session_id).await;
        let remaining = self.repository.count_sessions().await;

        match removed {
            Some(session) => tracing::info!(
                "Session '{}' ({}) disconnected. Total clients: {}",
                session_id,
                session.sender_name(),
                remaining
            ),
            None => tracing::debug!("Session '{}' was already removed", session_id),
        }

        remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{DisplayName, Timestamp},
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemorySessionRepository,
        },
    };

    #[tokio::test]
    async fn test_disconnect_releases_name() {
        // given:
        let repository = Arc::new(InMemorySessionRepository::new());
        let usecase = DisconnectSessionUseCase::new(
            repository.clone(),
            Arc::new(WebSocketMessagePusher::default()),
        );
        let alice = repository.admit(Timestamp::new(0)).await;
        let bob = repository.admit(Timestamp::new(0)).await;
        let name = DisplayName::new("alice".to_string()).unwrap();
        repository
            .lock()
            .await
            .registry
            .authenticate(alice, name.clone())
            .unwrap();

        // when:
        let remaining = usecase.execute(alice).await;

        // then:
        assert_eq!(remaining, 1);
        let mut state = repository.lock().await;
        assert_eq!(state.registry.lookup(&name), None);
        assert_eq!(state.registry.authenticate(bob, name), Ok(()));
    }

    #[tokio::test]
    async fn test_disconnect_is_idempotent() {
        // given:
        let repository = Arc::new(InMemorySessionRepository::new());
        let usecase = DisconnectSessionUseCase::new(
            repository.clone(),
            Arc::new(WebSocketMessagePusher::default()),
        );
        let session = repository.admit(Timestamp::new(0)).await;

        // when:
        let first = usecase.execute(session).await;
        let second = usecase.execute(session).await;

        // then:
        assert_eq!(first, 0);
        assert_eq!(second, 0);
    }
}
