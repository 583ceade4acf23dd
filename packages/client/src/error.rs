//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The server address cannot be turned into a WebSocket URL
    #[error("Invalid server address: {0}")]
    InvalidAddress(String),

    /// The connection could not be established
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// An established connection was closed or failed
    #[error("Connection lost")]
    ConnectionLost,
}
