//! Session registry: live sessions and the session ⇄ name bijection.
//!
//! The registry itself is a plain data structure. Callers that share it
//! between tasks wrap it in a single mutex (see the in-memory repository), so
//! `authenticate`'s check-then-bind runs atomically.

use std::collections::HashMap;

use super::{
    entity::Session,
    error::RegistryError,
    value_object::{DisplayName, SessionId, Timestamp},
};

#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<SessionId, Session>,
    names: HashMap<DisplayName, SessionId>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new, unauthenticated session.
    pub fn admit(&mut self, connected_at: Timestamp) -> SessionId {
        let id = SessionId::generate();
        self.sessions.insert(id, Session::new(id, connected_at));
        id
    }

    /// Bind `name` to the session.
    ///
    /// Fails with `NameTaken` when another live session holds the name.
    /// Re-claiming the session's own name succeeds; claiming a different name
    /// releases the previous one.
    pub fn authenticate(
        &mut self,
        session_id: SessionId,
        name: DisplayName,
    ) -> Result<(), RegistryError> {
        if let Some(owner) = self.names.get(&name)
            && *owner != session_id
        {
            return Err(RegistryError::NameTaken(name.into_string()));
        }

        let session = self
            .sessions
            .get_mut(&session_id)
            .ok_or_else(|| RegistryError::SessionNotFound(session_id.to_string()))?;

        if let Some(previous) = session.name.replace(name.clone()) {
            self.names.remove(&previous);
        }
        self.names.insert(name, session_id);
        Ok(())
    }

    /// Drop the session and its name binding. Idempotent.
    pub fn remove(&mut self, session_id: SessionId) -> Option<Session> {
        let session = self.sessions.remove(&session_id)?;
        if let Some(name) = &session.name {
            self.names.remove(name);
        }
        Some(session)
    }

    /// The live session currently bound to `name`.
    pub fn lookup(&self, name: &DisplayName) -> Option<SessionId> {
        self.names.get(name).copied()
    }

    pub fn get(&self, session_id: SessionId) -> Option<&Session> {
        self.sessions.get(&session_id)
    }

    /// Sender name of the session, `"Anonymous"` when unauthenticated or unknown.
    pub fn sender_name(&self, session_id: SessionId) -> String {
        self.sessions
            .get(&session_id)
            .map(Session::sender_name)
            .unwrap_or_else(|| super::entity::ANONYMOUS_SENDER.to_string())
    }

    /// Snapshot of every live session other than `session_id`.
    pub fn all_except(&self, session_id: SessionId) -> Vec<SessionId> {
        self.sessions
            .keys()
            .filter(|id| **id != session_id)
            .copied()
            .collect()
    }

    /// Snapshot of every authenticated session other than `session_id`.
    pub fn authenticated_except(&self, session_id: SessionId) -> Vec<SessionId> {
        self.all_except(session_id)
            .into_iter()
            .filter(|id| self.sessions.get(id).is_some_and(Session::is_authenticated))
            .collect()
    }

    pub fn count(&self) -> usize {
        self.sessions.len()
    }

    pub fn authenticated_count(&self) -> usize {
        self.names.len()
    }
}
