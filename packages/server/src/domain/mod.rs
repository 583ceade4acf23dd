//! Domain layer: relay state and the seams the use cases depend on.

pub mod entity;
pub mod error;
pub mod history;
pub mod message_pusher;
pub mod registry;
pub mod repository;
pub mod state;
pub mod value_object;

pub use entity::{Audience, ChatMessage, InboundCommand, Session, ANONYMOUS_SENDER};
pub use error::{MessagePushError, RegistryError, ValueObjectError};
pub use history::{HistoryBuffer, HISTORY_CAPACITY, HISTORY_REPLAY_LEN};
pub use message_pusher::{MessagePusher, Notification, PusherChannel};
#[cfg(test)]
pub use message_pusher::MockMessagePusher;
pub use registry::SessionRegistry;
pub use repository::{RelayStats, SessionRepository};
pub use state::RelayState;
pub use value_object::{DisplayName, MessageContent, SessionId, Timestamp};
