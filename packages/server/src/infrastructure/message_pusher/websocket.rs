//! WebSocket-backed `MessagePusher`.
//!
//! The UI layer owns each socket and drains an unbounded channel into it.
//! This pusher only keeps the sending halves, keyed by session, and encodes
//! notifications into envelopes. Pushing never awaits the network.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{MessagePushError, MessagePusher, Notification, PusherChannel, SessionId},
    infrastructure::dto::websocket::ServerEnvelope,
};

pub struct WebSocketMessagePusher {
    /// Outbound queues of the connected sessions
    clients: Arc<Mutex<HashMap<SessionId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    pub fn new(clients: Arc<Mutex<HashMap<SessionId, PusherChannel>>>) -> Self {
        Self { clients }
    }

    fn encode(notification: &Notification) -> Result<String, MessagePushError> {
        serde_json::to_string(&ServerEnvelope::from(notification.clone()))
            .map_err(|e| MessagePushError::EncodeFailed(e.to_string()))
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(HashMap::new())))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, session_id: SessionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(session_id, sender);
        tracing::debug!("Session '{}' registered to MessagePusher", session_id);
    }

    async fn unregister_client(&self, session_id: SessionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(&session_id);
        tracing::debug!("Session '{}' unregistered from MessagePusher", session_id);
    }

    async fn push_to(
        &self,
        session_id: SessionId,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        let frame = Self::encode(notification)?;
        let clients = self.clients.lock().await;

        let sender = clients
            .get(&session_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(session_id.to_string()))?;
        sender
            .send(frame)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to session '{}'", session_id);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<SessionId>,
        notification: &Notification,
    ) -> Result<Vec<SessionId>, MessagePushError> {
        let frame = Self::encode(notification)?;
        let clients = self.clients.lock().await;
        let mut delivered = Vec::with_capacity(targets.len());

        for target in targets {
            match clients.get(&target) {
                Some(sender) if sender.is_closed() => {
                    tracing::debug!("Session '{}' is closing, skipping", target);
                }
                Some(sender) => {
                    // One failed queue must not stop delivery to the others
                    if let Err(e) = sender.send(frame.clone()) {
                        tracing::warn!("Failed to push message to session '{}': {}", target, e);
                    } else {
                        delivered.push(target);
                    }
                }
                None => {
                    tracing::warn!("Session '{}' not found during broadcast, skipping", target);
                }
            }
        }

        Ok(delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChatMessage, Timestamp};
    use tokio::sync::mpsc;

    fn create_test_pusher() -> (
        WebSocketMessagePusher,
        Arc<Mutex<HashMap<SessionId, PusherChannel>>>,
    ) {
        let clients = Arc::new(Mutex::new(HashMap::new()));
        let pusher = WebSocketMessagePusher::new(clients.clone());
        (pusher, clients)
    }

    fn chat(content: &str) -> Notification {
        Notification::Chat(ChatMessage::broadcast(
            "alice".to_string(),
            content.into(),
            Timestamp::new(0),
        ))
    }

    #[tokio::test]
    async fn test_push_to_success() {
        // given:
        let (pusher, _clients) = create_test_pusher();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let session = SessionId::generate();
        pusher.register_client(session, tx).await;

        // when:
        let result = pusher.push_to(session, &Notification::AuthRequest).await;

        // then:
        assert!(result.is_ok());
        assert_eq!(rx.recv().await, Some(r#"{"type":"auth_request"}"#.to_string()));
    }

    #[tokio::test]
    async fn test_push_to_client_not_found() {
        // given:
        let (pusher, _clients) = create_test_pusher();

        // when:
        let result = pusher
            .push_to(SessionId::generate(), &Notification::AuthRequest)
            .await;

        // then:
        assert!(matches!(result, Err(MessagePushError::ClientNotFound(_))));
    }

    #[tokio::test]
    async fn test_push_to_closed_channel_fails() {
        // given:
        let (pusher, _clients) = create_test_pusher();
        let (tx, rx) = mpsc::unbounded_channel();
        let session = SessionId::generate();
        pusher.register_client(session, tx).await;
        drop(rx);

        // when:
        let result = pusher.push_to(session, &Notification::AuthRequest).await;

        // then:
        assert!(matches!(result, Err(MessagePushError::PushFailed(_))));
    }

    #[tokio::test]
    async fn test_broadcast_success() {
        // given:
        let (pusher, clients) = create_test_pusher();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let alice = SessionId::generate();
        let bob = SessionId::generate();
        {
            let mut clients_lock = clients.lock().await;
            clients_lock.insert(alice, tx1);
            clients_lock.insert(bob, tx2);
        }

        // when:
        let delivered = pusher.broadcast(vec![alice, bob], &chat("hello")).await;

        // then:
        assert_eq!(delivered.unwrap().len(), 2);
        let frame1 = rx1.recv().await.unwrap();
        let frame2 = rx2.recv().await.unwrap();
        assert_eq!(frame1, frame2);
        assert!(frame1.contains(r#""content":"hello""#));
    }

    #[tokio::test]
    async fn test_broadcast_skips_closed_and_missing_sessions() {
        // given:
        let (pusher, _clients) = create_test_pusher();
        let (open_tx, mut open_rx) = mpsc::unbounded_channel();
        let (closed_tx, closed_rx) = mpsc::unbounded_channel::<String>();
        let open = SessionId::generate();
        let closed = SessionId::generate();
        let missing = SessionId::generate();
        pusher.register_client(open, open_tx).await;
        pusher.register_client(closed, closed_tx).await;
        drop(closed_rx);

        // when:
        let delivered = pusher
            .broadcast(vec![closed, missing, open], &chat("still here"))
            .await
            .unwrap();

        // then:
        assert_eq!(delivered, vec![open]);
        assert!(open_rx.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_broadcast_empty_targets() {
        // given:
        let (pusher, _clients) = create_test_pusher();

        // when:
        let result = pusher.broadcast(vec![], &chat("nobody")).await;

        // then:
        assert_eq!(result, Ok(vec![]));
    }

    #[tokio::test]
    async fn test_unregister_client() {
        // given:
        let (pusher, clients) = create_test_pusher();
        let (tx, _rx) = mpsc::unbounded_channel();
        let session = SessionId::generate();
        pusher.register_client(session, tx).await;

        // when:
        pusher.unregister_client(session).await;

        // then:
        assert!(clients.lock().await.is_empty());
    }
}
