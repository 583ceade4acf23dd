//! Outbound notification seam.
//!
//! Use cases decide *what* to tell a session; a `MessagePusher`
//! implementation decides how it is encoded and written to the connection.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{entity::ChatMessage, error::MessagePushError, value_object::SessionId};

/// Per-connection outbound queue. Frames are already encoded.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Something the relay tells one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Sent right after a connection is admitted
    AuthRequest,
    /// The claimed name was accepted
    AuthSuccess {
        greeting: String,
        history: Vec<ChatMessage>,
    },
    /// The claimed name was rejected
    AuthError { reason: String },
    /// A broadcast or private chat message
    Chat(ChatMessage),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Attach an outbound channel to a session
    async fn register_client(&self, session_id: SessionId, sender: PusherChannel);

    /// Detach the session's outbound channel
    async fn unregister_client(&self, session_id: SessionId);

    /// Push to one session
    async fn push_to(
        &self,
        session_id: SessionId,
        notification: &Notification,
    ) -> Result<(), MessagePushError>;

    /// Push to many sessions, best effort.
    ///
    /// Returns the sessions the notification was actually queued for. Closed
    /// or unknown sessions are skipped.
    async fn broadcast(
        &self,
        targets: Vec<SessionId>,
        notification: &Notification,
    ) -> Result<Vec<SessionId>, MessagePushError>;
}
