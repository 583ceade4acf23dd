//! Pure client-side logic: input grammar and reconnect policy.

use crate::error::ClientError;

/// What a line typed at the prompt asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    /// Blank line
    Empty,
    Broadcast(String),
    Private { recipient: String, content: String },
    Help,
    Quit,
    /// A recognised command used incorrectly
    Invalid(String),
}

/// Parse one line of user input.
///
/// `/msg <name> <text>` (or `/pm`) sends a private message, `/help` and
/// `/quit` are local commands, and anything else is broadcast as typed.
pub fn parse_input(line: &str) -> ClientCommand {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ClientCommand::Empty;
    }

    let mut words = trimmed.splitn(2, char::is_whitespace);
    match words.next() {
        Some("/quit") | Some("/exit") => ClientCommand::Quit,
        Some("/help") => ClientCommand::Help,
        Some("/msg") | Some("/pm") => {
            let rest = words.next().unwrap_or("").trim_start();
            let mut parts = rest.splitn(2, char::is_whitespace);
            match (parts.next(), parts.next().map(str::trim)) {
                (Some(recipient), Some(content)) if !recipient.is_empty() && !content.is_empty() => {
                    ClientCommand::Private {
                        recipient: recipient.to_string(),
                        content: content.to_string(),
                    }
                }
                _ => ClientCommand::Invalid("usage: /msg <name> <message>".to_string()),
            }
        }
        _ => ClientCommand::Broadcast(trimmed.to_string()),
    }
}

/// The username a line claims while the session is unauthenticated.
///
/// Only a plain line is a name. Commands, including unknown `/...` words, are
/// not sent as claims.
pub fn username_from_input(command: &ClientCommand) -> Option<&str> {
    match command {
        ClientCommand::Broadcast(line) if !line.starts_with('/') => Some(line),
        _ => None,
    }
}

/// Check if the client should exit immediately based on the error type.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::InvalidAddress(_))
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }

    current_attempt < max_attempts
}

/// WebSocket URL of a relay server.
pub fn server_url(host: &str, port: u16) -> String {
    format!("ws://{}:{}/", host, port)
}
