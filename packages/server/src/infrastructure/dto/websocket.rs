//! WebSocket envelopes.
//!
//! Every frame carries one JSON object tagged by its `type`. Outbound frames
//! are strict; inbound frames are decoded leniently by [`parse_command`] so
//! that plain text still reaches everyone as a broadcast.

use serde::{Deserialize, Serialize};

use crate::domain::InboundCommand;

/// One replayed history entry inside `auth_success`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub sender: String,
    pub content: String,
    pub timestamp: String,
}

/// Envelopes sent by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEnvelope {
    AuthRequest,
    AuthSuccess {
        content: String,
        history: Vec<HistoryEntry>,
    },
    AuthError {
        content: String,
    },
    Private {
        sender: String,
        recipient: String,
        content: String,
        timestamp: String,
    },
    Broadcast {
        sender: String,
        content: String,
        timestamp: String,
    },
}

/// Envelopes sent by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEnvelope {
    Auth { username: String },
    Private { recipient: String, content: String },
    Broadcast { content: String },
}

/// Loosely typed view of an inbound frame.
#[derive(Debug, Deserialize)]
struct RawEnvelope {
    #[serde(rename = "type", alias = "kind", default)]
    kind: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    recipient: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

/// Classify one inbound text frame.
///
/// Frames that are not a JSON object with string fields become a broadcast of
/// the raw text. Objects that are neither a complete `auth` nor a complete
/// `private` request become a broadcast of their `content` (empty if absent).
pub fn parse_command(text: &str) -> InboundCommand {
    let raw = match serde_json::from_str::<RawEnvelope>(text) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::debug!("Frame is not an envelope ({}), relaying as plain text", e);
            return InboundCommand::Broadcast {
                content: text.to_string(),
            };
        }
    };

    match (raw.kind.as_deref(), raw.username, raw.recipient, raw.content) {
        (Some("auth"), Some(username), _, _) => InboundCommand::Authenticate { username },
        (Some("private"), _, Some(recipient), Some(content)) => {
            InboundCommand::Private { recipient, content }
        }
        (_, _, _, content) => InboundCommand::Broadcast {
            content: content.unwrap_or_default(),
        },
    }
}
