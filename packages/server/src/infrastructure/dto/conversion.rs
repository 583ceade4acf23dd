//! Conversion logic between DTOs and domain entities.

use chatrelay_shared::time::{rfc3339_to_timestamp, timestamp_to_rfc3339};
use thiserror::Error;

use crate::domain::{
    Audience, ChatMessage, DisplayName, MessageContent, Notification, RelayStats, Timestamp,
};
use crate::infrastructure::dto::{
    http::StatsDto,
    websocket::{HistoryEntry, ServerEnvelope},
};

/// Errors while turning a wire envelope back into a domain message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("envelope does not carry a chat message")]
    NotAChatMessage,

    #[error("invalid timestamp '{0}'")]
    InvalidTimestamp(String),

    #[error("invalid recipient '{0}'")]
    InvalidRecipient(String),
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<ChatMessage> for ServerEnvelope {
    fn from(message: ChatMessage) -> Self {
        let timestamp = timestamp_to_rfc3339(message.timestamp.value());
        match message.audience {
            Audience::Everyone => Self::Broadcast {
                sender: message.sender,
                content: message.content.into_string(),
                timestamp,
            },
            Audience::Direct(recipient) => Self::Private {
                sender: message.sender,
                recipient: recipient.into_string(),
                content: message.content.into_string(),
                timestamp,
            },
        }
    }
}

impl From<ChatMessage> for HistoryEntry {
    fn from(message: ChatMessage) -> Self {
        Self {
            sender: message.sender,
            content: message.content.into_string(),
            timestamp: timestamp_to_rfc3339(message.timestamp.value()),
        }
    }
}

impl From<Notification> for ServerEnvelope {
    fn from(notification: Notification) -> Self {
        match notification {
            Notification::AuthRequest => Self::AuthRequest,
            Notification::AuthSuccess { greeting, history } => Self::AuthSuccess {
                content: greeting,
                history: history.into_iter().map(HistoryEntry::from).collect(),
            },
            Notification::AuthError { reason } => Self::AuthError { content: reason },
            Notification::Chat(message) => message.into(),
        }
    }
}

impl From<RelayStats> for StatsDto {
    fn from(stats: RelayStats) -> Self {
        Self {
            connections: stats.connections,
            authenticated: stats.authenticated,
            history: stats.history,
        }
    }
}

// ========================================
// DTO → Domain Entity
// ========================================

impl TryFrom<ServerEnvelope> for ChatMessage {
    type Error = ConversionError;

    fn try_from(envelope: ServerEnvelope) -> Result<Self, Self::Error> {
        let parse = |timestamp: String| {
            rfc3339_to_timestamp(&timestamp)
                .map(Timestamp::new)
                .map_err(|_| ConversionError::InvalidTimestamp(timestamp))
        };

        match envelope {
            ServerEnvelope::Broadcast {
                sender,
                content,
                timestamp,
            } => Ok(ChatMessage::broadcast(
                sender,
                MessageContent::new(content),
                parse(timestamp)?,
            )),
            ServerEnvelope::Private {
                sender,
                recipient,
                content,
                timestamp,
            } => {
                let recipient = DisplayName::new(recipient.clone())
                    .map_err(|_| ConversionError::InvalidRecipient(recipient))?;
                Ok(ChatMessage::private(
                    sender,
                    recipient,
                    MessageContent::new(content),
                    parse(timestamp)?,
                ))
            }
            _ => Err(ConversionError::NotAChatMessage),
        }
    }
}
