//! UseCase: broadcast a message to every other authenticated session.

use std::sync::Arc;

use chatrelay_shared::time::Clock;

use crate::domain::{
    MessageContent, MessagePusher, Notification, SessionId, SessionRepository, Timestamp,
};

use super::error::SendMessageError;

pub struct SendMessageUseCase {
    repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
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

    /// Stamp, record and fan out a broadcast message.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<SessionId>)` - Sessions the message was queued for (never the sender)
    /// * `Err(SendMessageError)` - The message could not be encoded
    pub async fn execute(
        &self,
        from: SessionId,
        content: MessageContent,
    ) -> Result<Vec<SessionId>, SendMessageError> {
        let timestamp = Timestamp::new(self.clock.now_millis());

        // Recording and queueing under one guard keeps a concurrent
        // authentication from seeing this message both live and replayed.
        let mut state = self.repository.lock().await;
        let (message, targets) = state.record_broadcast(from, content, timestamp);

        tracing::debug!(
            "Broadcasting message from '{}' to {} session(s)",
            message.sender,
            targets.len()
        );

        let delivered = self
            .message_pusher
            .broadcast(targets, &Notification::Chat(message))
            .await
            .map_err(|e| SendMessageError::DeliveryFailed(e.to_string()));
        drop(state);

        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{DisplayName, MessagePushError, MockMessagePusher, HISTORY_CAPACITY},
        infrastructure::repository::InMemorySessionRepository,
    };
    use chatrelay_shared::time::FixedClock;

    async fn authenticated(repository: &InMemorySessionRepository, name: &str) -> SessionId {
        let id = repository.admit(Timestamp::new(0)).await;
        repository
            .lock()
            .await
            .registry
            .authenticate(id, DisplayName::new(name.to_string()).unwrap())
            .unwrap();
        id
    }

    #[tokio::test]
    async fn test_send_message_targets_everyone_but_sender() {
        // given:
        let repository = Arc::new(InMemorySessionRepository::new());
        let alice = authenticated(&repository, "alice").await;
        let bob = authenticated(&repository, "bob").await;
        let charlie = authenticated(&repository, "charlie").await;

        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_broadcast()
            .withf(move |targets, notification| {
                let Notification::Chat(message) = notification else {
                    return false;
                };
                targets.len() == 2
                    && !targets.contains(&alice)
                    && message.sender == "alice"
                    && message.content.as_str() == "hi"
                    && message.timestamp == Timestamp::new(42)
            })
            .times(1)
            .returning(|targets, _| Ok(targets));
        let usecase = SendMessageUseCase::new(
            repository.clone(),
            Arc::new(pusher),
            Arc::new(FixedClock::new(42)),
        );

        // when:
        let delivered = usecase.execute(alice, "hi".into()).await.unwrap();

        // then:
        assert_eq!(delivered.len(), 2);
        assert!(delivered.contains(&bob));
        assert!(delivered.contains(&charlie));
        let history = repository.lock().await.history.recent_up_to(10);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].sender, "alice");
    }

    #[tokio::test]
    async fn test_send_message_from_unauthenticated_session_is_anonymous() {
        // given:
        let repository = Arc::new(InMemorySessionRepository::new());
        let lurker = repository.admit(Timestamp::new(0)).await;
        let _bob = authenticated(&repository, "bob").await;

        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_broadcast()
            .returning(|targets, _| Ok(targets));
        let usecase = SendMessageUseCase::new(
            repository.clone(),
            Arc::new(pusher),
            Arc::new(FixedClock::new(0)),
        );

        // when:
        let delivered = usecase.execute(lurker, "boo".into()).await.unwrap();

        // then:
        assert_eq!(delivered.len(), 1);
        assert_eq!(
            repository.lock().await.history.recent_up_to(1)[0].sender,
            "Anonymous"
        );
    }

    #[tokio::test]
    async fn test_send_message_alone_still_records_history() {
        // given:
        let repository = Arc::new(InMemorySessionRepository::new());
        let alice = authenticated(&repository, "alice").await;

        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_broadcast()
            .withf(|targets, _| targets.is_empty())
            .returning(|targets, _| Ok(targets));
        let usecase = SendMessageUseCase::new(
            repository.clone(),
            Arc::new(pusher),
            Arc::new(FixedClock::new(0)),
        );

        // when:
        let delivered = usecase.execute(alice, "echo?".into()).await.unwrap();

        // then:
        assert!(delivered.is_empty());
        assert_eq!(repository.stats().await.history, 1);
    }

    #[tokio::test]
    async fn test_send_message_history_is_capped() {
        // given:
        let repository = Arc::new(InMemorySessionRepository::new());
        let alice = authenticated(&repository, "alice").await;
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_broadcast()
            .returning(|targets, _| Ok(targets));
        let usecase = SendMessageUseCase::new(
            repository.clone(),
            Arc::new(pusher),
            Arc::new(FixedClock::new(0)),
        );

        // when:
        for n in 0..(HISTORY_CAPACITY + 20) {
            usecase
                .execute(alice, format!("m{}", n).into())
                .await
                .unwrap();
        }

        // then:
        assert_eq!(repository.stats().await.history, HISTORY_CAPACITY);
    }

    #[tokio::test]
    async fn test_send_message_encode_failure_is_reported() {
        // given:
        let repository = Arc::new(InMemorySessionRepository::new());
        let alice = authenticated(&repository, "alice").await;
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_broadcast()
            .returning(|_, _| Err(MessagePushError::EncodeFailed("boom".to_string())));
        let usecase = SendMessageUseCase::new(
            repository,
            Arc::new(pusher),
            Arc::new(FixedClock::new(0)),
        );

        // when:
        let result = usecase.execute(alice, "hi".into()).await;

        // then:
        assert!(matches!(result, Err(SendMessageError::DeliveryFailed(_))));
    }
}
