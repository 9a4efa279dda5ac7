//! Typing indicator set
//!
//! Connections currently composing a message, in the order they started.

use crate::types::ClientId;

#[derive(Debug, Default)]
pub struct TypingSet {
    entries: Vec<(ClientId, String)>,
}

impl TypingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a connection as typing, refreshing its name if already present
    pub fn start(&mut self, client_id: ClientId, username: String) {
        match self.entries.iter_mut().find(|(id, _)| *id == client_id) {
            Some(entry) => entry.1 = username,
            None => self.entries.push((client_id, username)),
        }
    }

    /// Remove a connection; returns whether it was typing
    pub fn stop(&mut self, client_id: ClientId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(id, _)| *id != client_id);
        self.entries.len() != before
    }

    /// Update the set from a typing event
    pub fn set(&mut self, client_id: ClientId, username: String, is_typing: bool) {
        if is_typing {
            self.start(client_id, username);
        } else {
            self.stop(client_id);
        }
    }

    pub fn contains(&self, client_id: ClientId) -> bool {
        self.entries.iter().any(|(id, _)| *id == client_id)
    }

    pub fn usernames(&self) -> Vec<String> {
        self.entries.iter().map(|(_, name)| name.clone()).collect()
    }
}
