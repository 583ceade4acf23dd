//! Message router: dispatch one inbound command of a session.
//!
//! Routing failures never escape the router. Each outcome is logged and
//! returned so the connection loop can carry on with the next frame.

use std::sync::Arc;

use crate::domain::{InboundCommand, MessageContent, SessionId};

use super::{
    authenticate::AuthenticateUseCase,
    error::{AuthenticateError, SendMessageError},
    send_message::SendMessageUseCase,
    send_private_message::SendPrivateMessageUseCase,
};

/// What the router did with a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The name was bound; `replayed` history entries were sent back
    Authenticated { replayed: usize },
    /// The name claim was refused and `auth_error` was sent
    AuthRejected(AuthenticateError),
    /// A broadcast was queued for these sessions
    Broadcast { delivered: Vec<SessionId> },
    /// A private message was queued for these sessions (empty when dropped)
    Private { delivered: Vec<SessionId> },
    /// Delivery could not even be attempted
    Failed(SendMessageError),
}

pub struct MessageRouter {
    authenticate_usecase: Arc<AuthenticateUseCase>,
    send_message_usecase: Arc<SendMessageUseCase>,
    send_private_message_usecase: Arc<SendPrivateMessageUseCase>,
}

impl MessageRouter {
    pub fn new(
        authenticate_usecase: Arc<AuthenticateUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        send_private_message_usecase: Arc<SendPrivateMessageUseCase>,
    ) -> Self {
        Self {
            authenticate_usecase,
            send_message_usecase,
            send_private_message_usecase,
        }
    }

    pub async fn route(&self, session_id: SessionId, command: InboundCommand) -> RouteOutcome {
        let outcome = match command {
            InboundCommand::Authenticate { username } => {
                match self.authenticate_usecase.execute(session_id, username).await {
                    Ok(history) => RouteOutcome::Authenticated {
                        replayed: history.len(),
                    },
                    Err(e) => RouteOutcome::AuthRejected(e),
                }
            }
            InboundCommand::Private { recipient, content } => {
                match self
                    .send_private_message_usecase
                    .execute(session_id, recipient, MessageContent::new(content))
                    .await
                {
                    Ok(delivered) => RouteOutcome::Private { delivered },
                    Err(e) => RouteOutcome::Failed(e),
                }
            }
            InboundCommand::Broadcast { content } => {
                match self
                    .send_message_usecase
                    .execute(session_id, MessageContent::new(content))
                    .await
                {
                    Ok(delivered) => RouteOutcome::Broadcast { delivered },
                    Err(e) => RouteOutcome::Failed(e),
                }
            }
        };

        match &outcome {
            RouteOutcome::Failed(e) => {
                tracing::warn!("Routing for session '{}' failed: {}", session_id, e)
            }
            other => tracing::debug!("Routed message of session '{}': {:?}", session_id, other),
        }

        outcome
    }
}
