//! Domain entities.

use super::value_object::{DisplayName, MessageContent, SessionId, Timestamp};

/// Sender name used for sessions that have not authenticated yet.
pub const ANONYMOUS_SENDER: &str = "Anonymous";

/// Server-side state of one live connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: SessionId,
    pub name: Option<DisplayName>,
    pub connected_at: Timestamp,
}

impl Session {
    /// A freshly admitted, unauthenticated session.
    pub fn new(id: SessionId, connected_at: Timestamp) -> Self {
        Self {
            id,
            name: None,
            connected_at,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.name.is_some()
    }

    /// Name shown as the sender of this session's messages.
    pub fn sender_name(&self) -> String {
        self.name
            .as_ref()
            .map(|name| name.as_str().to_string())
            .unwrap_or_else(|| ANONYMOUS_SENDER.to_string())
    }
}

/// Who a chat message is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audience {
    /// Every other authenticated session
    Everyone,
    /// Exactly one named session (plus an echo to the sender)
    Direct(DisplayName),
}

/// An immutable chat message, stamped by the server when it is processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: String,
    pub audience: Audience,
    pub content: MessageContent,
    pub timestamp: Timestamp,
}

impl ChatMessage {
    pub fn broadcast(sender: String, content: MessageContent, timestamp: Timestamp) -> Self {
        Self {
            sender,
            audience: Audience::Everyone,
            content,
            timestamp,
        }
    }

    pub fn private(
        sender: String,
        recipient: DisplayName,
        content: MessageContent,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            sender,
            audience: Audience::Direct(recipient),
            content,
            timestamp,
        }
    }

    pub fn is_private(&self) -> bool {
        matches!(self.audience, Audience::Direct(_))
    }
}

/// What a session asked the relay to do with one inbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundCommand {
    Authenticate { username: String },
    Private { recipient: String, content: String },
    Broadcast { content: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_unauthenticated() {
        // given / when:
        let session = Session::new(SessionId::generate(), Timestamp::new(1000));

        // then:
        assert!(!session.is_authenticated());
        assert_eq!(session.sender_name(), ANONYMOUS_SENDER);
    }

    #[test]
    fn test_named_session_uses_its_name_as_sender() {
        // given:
        let mut session = Session::new(SessionId::generate(), Timestamp::new(1000));

        // when:
        session.name = Some(DisplayName::new("alice".to_string()).unwrap());

        // then:
        assert!(session.is_authenticated());
        assert_eq!(session.sender_name(), "alice");
    }

    #[test]
    fn test_chat_message_constructors() {
        // given:
        let bob = DisplayName::new("bob".to_string()).unwrap();

        // when:
        let broadcast =
            ChatMessage::broadcast("alice".to_string(), "hi".into(), Timestamp::new(1));
        let private =
            ChatMessage::private("alice".to_string(), bob.clone(), "psst".into(), Timestamp::new(2));

        // then:
        assert!(!broadcast.is_private());
        assert_eq!(broadcast.audience, Audience::Everyone);
        assert!(private.is_private());
        assert_eq!(private.audience, Audience::Direct(bob));
    }
}
