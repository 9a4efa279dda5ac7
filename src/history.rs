//! Bounded public message log

use std::collections::VecDeque;

use crate::models::ChatMessage;

/// Maximum number of chat messages kept in memory
pub const MAX_MESSAGES: usize = 100;

/// Append-only FIFO of recent chat messages; oldest evicted first
#[derive(Debug)]
pub struct MessageLog {
    messages: VecDeque<ChatMessage>,
    capacity: usize,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::with_capacity(MAX_MESSAGES)
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

    /// Oldest-first copy of the log
    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.messages.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}
