//! Bounded buffer of recent broadcast messages.

use std::collections::VecDeque;

use super::entity::ChatMessage;

/// Maximum number of broadcast messages kept in memory.
pub const HISTORY_CAPACITY: usize = 100;

/// Number of messages replayed to a session when it authenticates.
pub const HISTORY_REPLAY_LEN: usize = 10;

/// FIFO ring of the most recent broadcast messages.
///
/// Appending beyond capacity evicts from the head. Nothing is persisted.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    messages: VecDeque<ChatMessage>,
    capacity: usize,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push_back(message);
        while self.messages.len() > self.capacity {
            self.messages.pop_front();
        }
    }

    /// The last `n` entries in chronological order (fewer if the buffer is shorter).
    pub fn recent_up_to(&self, n: usize) -> Vec<ChatMessage> {
        let skip = self.messages.len().saturating_sub(n);
        self.messages.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
