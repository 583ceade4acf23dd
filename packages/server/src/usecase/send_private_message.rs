//! UseCase: deliver a message to one named session.

use std::sync::Arc;

use chatrelay_shared::time::Clock;

use crate::domain::{
    ChatMessage, DisplayName, MessageContent, MessagePusher, Notification, SessionId,
    SessionRepository, Timestamp,
};

use super::error::SendMessageError;

pub struct SendPrivateMessageUseCase {
    repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl SendPrivateMessageUseCase {
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

    /// Deliver `content` to the session named `recipient` and echo it to the sender.
    ///
    /// An unknown recipient is dropped silently and yields an empty list; the
    /// sender is not notified. A message to oneself is delivered once.
    pub async fn execute(
        &self,
        from: SessionId,
        recipient: String,
        content: MessageContent,
    ) -> Result<Vec<SessionId>, SendMessageError> {
        let Ok(recipient) = DisplayName::new(recipient) else {
            tracing::debug!("Dropping private message from '{}' to a blank name", from);
            return Ok(Vec::new());
        };

        let (sender, recipient_id) = {
            let state = self.repository.lock().await;
            (
                state.registry.sender_name(from),
                state.registry.lookup(&recipient),
            )
        };
        let Some(recipient_id) = recipient_id else {
            tracing::debug!(
                "Dropping private message from '{}': no session named '{}'",
                sender,
                recipient
            );
            return Ok(Vec::new());
        };

        let message = ChatMessage::private(
            sender,
            recipient,
            content,
            Timestamp::new(self.clock.now_millis()),
        );

        let mut targets = vec![recipient_id];
        if from != recipient_id {
            targets.push(from);
        }

        self.message_pusher
            .broadcast(targets, &Notification::Chat(message))
            .await
            .map_err(|e| SendMessageError::DeliveryFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemorySessionRepository,
    };
    use chatrelay_shared::time::FixedClock;
    use tokio::sync::mpsc;

    struct Fixture {
        repository: Arc<InMemorySessionRepository>,
        pusher: Arc<WebSocketMessagePusher>,
        usecase: SendPrivateMessageUseCase,
    }

    impl Fixture {
        fn new() -> Self {
            let repository = Arc::new(InMemorySessionRepository::new());
            let pusher = Arc::new(WebSocketMessagePusher::default());
            let usecase = SendPrivateMessageUseCase::new(
                repository.clone(),
                pusher.clone(),
                Arc::new(FixedClock::new(1_672_531_200_000)),
            );
            Self {
                repository,
                pusher,
                usecase,
            }
        }

        async fn join(&self, name: &str) -> (SessionId, mpsc::UnboundedReceiver<String>) {
            let (tx, rx) = mpsc::unbounded_channel();
            let id = self.repository.admit(Timestamp::new(0)).await;
            self.repository
                .lock()
                .await
                .registry
                .authenticate(id, DisplayName::new(name.to_string()).unwrap())
                .unwrap();
            self.pusher.register_client(id, tx).await;
            (id, rx)
        }
    }

    #[tokio::test]
    async fn test_private_message_reaches_recipient_and_echoes_sender() {
        // given:
        let fixture = Fixture::new();
        let (alice, mut alice_rx) = fixture.join("alice").await;
        let (bob, mut bob_rx) = fixture.join("bob").await;
        let (_carol, mut carol_rx) = fixture.join("carol").await;

        // when:
        let delivered = fixture
            .usecase
            .execute(alice, "bob".to_string(), "secret".into())
            .await
            .unwrap();

        // then:
        assert_eq!(delivered, vec![bob, alice]);
        let expected = serde_json::json!({
            "type": "private",
            "sender": "alice",
            "recipient": "bob",
            "content": "secret",
            "timestamp": "2023-01-01T00:00:00.000Z"
        });
        let to_bob: serde_json::Value = serde_json::from_str(&bob_rx.recv().await.unwrap()).unwrap();
        let to_alice: serde_json::Value =
            serde_json::from_str(&alice_rx.recv().await.unwrap()).unwrap();
        assert_eq!(to_bob, expected);
        assert_eq!(to_alice, expected);
        assert!(carol_rx.try_recv().is_err());
        assert_eq!(fixture.repository.stats().await.history, 0);
    }

    #[tokio::test]
    async fn test_private_message_to_unknown_recipient_is_dropped() {
        // given:
        let fixture = Fixture::new();
        let (alice, mut alice_rx) = fixture.join("alice").await;

        // when:
        let delivered = fixture
            .usecase
            .execute(alice, "nobody".to_string(), "hello?".into())
            .await
            .unwrap();

        // then:
        assert!(delivered.is_empty());
        assert!(alice_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_private_message_recipient_is_case_sensitive() {
        // given:
        let fixture = Fixture::new();
        let (alice, _alice_rx) = fixture.join("alice").await;
        let (_bob, mut bob_rx) = fixture.join("bob").await;

        // when:
        let delivered = fixture
            .usecase
            .execute(alice, "Bob".to_string(), "hey".into())
            .await
            .unwrap();

        // then:
        assert!(delivered.is_empty());
        assert!(bob_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_private_message_to_self_is_delivered_once() {
        // given:
        let fixture = Fixture::new();
        let (alice, mut alice_rx) = fixture.join("alice").await;

        // when:
        let delivered = fixture
            .usecase
            .execute(alice, "alice".to_string(), "note to self".into())
            .await
            .unwrap();

        // then:
        assert_eq!(delivered, vec![alice]);
        assert!(alice_rx.recv().await.is_some());
        assert!(alice_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_private_message_from_anonymous_sender() {
        // given:
        let fixture = Fixture::new();
        let (bob, mut bob_rx) = fixture.join("bob").await;
        let (tx, _rx) = mpsc::unbounded_channel();
        let lurker = fixture.repository.admit(Timestamp::new(0)).await;
        fixture.pusher.register_client(lurker, tx).await;

        // when:
        let delivered = fixture
            .usecase
            .execute(lurker, "bob".to_string(), "guess who".into())
            .await
            .unwrap();

        // then:
        assert_eq!(delivered, vec![bob, lurker]);
        let frame: serde_json::Value = serde_json::from_str(&bob_rx.recv().await.unwrap()).unwrap();
        assert_eq!(frame["sender"], "Anonymous");
    }
}
