//! UseCase error types.

use thiserror::Error;

/// Why a name claim was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthenticateError {
    #[error("Username must not be empty")]
    InvalidName,

    #[error("Username '{0}' is already taken")]
    NameTaken(String),

    #[error("Session '{0}' is not connected")]
    SessionNotFound(String),
}

/// Message delivery failures that abort the whole send
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    #[error("Failed to deliver message: {0}")]
    DeliveryFailed(String),
}
