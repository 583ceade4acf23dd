//! UseCase: claim a display name.

use std::sync::Arc;

use crate::domain::{
    ChatMessage, DisplayName, HISTORY_REPLAY_LEN, MessagePusher, Notification, RegistryError,
    SessionId, SessionRepository,
};

use super::error::AuthenticateError;

pub struct AuthenticateUseCase {
    repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl AuthenticateUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Bind `username` to the session and reply to it.
    ///
    /// On success the session receives `auth_success` with the most recent
    /// broadcast history, which is also returned. On a rejected name it
    /// receives `auth_error` and stays unauthenticated.
    ///
    /// The reply is queued before the relay state is released, so it reaches
    /// the session ahead of any broadcast that counts it as a target.
    pub async fn execute(
        &self,
        session_id: SessionId,
        username: String,
    ) -> Result<Vec<ChatMessage>, AuthenticateError> {
        let Ok(name) = DisplayName::new(username) else {
            self.reply(session_id, &Notification::AuthError {
                reason: AuthenticateError::InvalidName.to_string(),
            })
            .await;
            return Err(AuthenticateError::InvalidName);
        };

        let mut state = self.repository.lock().await;
        let result = state
            .authenticate_and_snapshot(session_id, name.clone(), HISTORY_REPLAY_LEN)
            .map_err(|e| match e {
                RegistryError::NameTaken(name) => AuthenticateError::NameTaken(name),
                RegistryError::SessionNotFound(id) => AuthenticateError::SessionNotFound(id),
            });

        match &result {
            Ok(history) => {
                tracing::info!("Session '{}' authenticated as '{}'", session_id, name);
                self.reply(session_id, &Notification::AuthSuccess {
                    greeting: format!("Welcome, {}!", name),
                    history: history.clone(),
                })
                .await;
            }
            Err(AuthenticateError::SessionNotFound(_)) => {
                tracing::warn!("Authentication from unknown session '{}'", session_id);
            }
            Err(e) => {
                tracing::info!("Session '{}' authentication refused: {}", session_id, e);
                self.reply(session_id, &Notification::AuthError {
                    reason: e.to_string(),
                })
                .await;
            }
        }
        drop(state);

        result
    }

    async fn reply(&self, session_id: SessionId, notification: &Notification) {
        if let Err(e) = self.message_pusher.push_to(session_id, notification).await {
            tracing::warn!("Failed to reply to authentication of '{}': {}", session_id, e);
        }
    }
}
