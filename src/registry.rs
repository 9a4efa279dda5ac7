//! Connection registry
//!
//! Tracks every live connection and, for those that have announced
//! themselves, the user record bound to it. Broadcasts go to every live
//! connection; user lists contain only joined ones.

use std::collections::HashMap;

use tokio::sync::mpsc;
use tracing::debug;

use crate::client::Client;
use crate::message::ServerMessage;
use crate::models::User;
use crate::types::{ClientId, Role};

/// Display name used for events from a connection that never joined
pub const ANONYMOUS: &str = "Anonymous";

/// Connections and the users bound to them
#[derive(Debug, Default)]
pub struct Registry {
    /// All live connections: ClientId -> Client
    clients: HashMap<ClientId, Client>,
    /// Joined users: ClientId -> User
    users: HashMap<ClientId, User>,
    /// First-join order, so user lists are stable across snapshots
    join_order: Vec<ClientId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly accepted connection
    pub fn connect(&mut self, client_id: ClientId, sender: mpsc::Sender<ServerMessage>) {
        self.clients.insert(client_id, Client::new(client_id, sender));
    }

    /// Forget a connection entirely, returning its user record if it had joined
    pub fn disconnect(&mut self, client_id: ClientId) -> Option<User> {
        self.clients.remove(&client_id);
        self.leave(client_id)
    }

    /// Bind a user record to a connection
    ///
    /// A re-join overwrites the previous record but keeps its position in
    /// the user list.
    pub fn join(&mut self, client_id: ClientId, username: String, role: Role) -> User {
        let user = User {
            id: client_id,
            username,
            role,
        };
        if self.users.insert(client_id, user.clone()).is_none() {
            self.join_order.push(client_id);
        }
        user
    }

    /// Remove the user record for a connection; no-op if it never joined
    pub fn leave(&mut self, client_id: ClientId) -> Option<User> {
        let user = self.users.remove(&client_id)?;
        self.join_order.retain(|id| *id != client_id);
        Some(user)
    }

    /// Resolve who sent an event
    pub fn lookup(&self, client_id: ClientId) -> Option<&User> {
        self.users.get(&client_id)
    }

    /// Name to stamp on records from this connection
    pub fn display_name(&self, client_id: ClientId) -> String {
        self.lookup(client_id)
            .map(|user| user.username.clone())
            .unwrap_or_else(|| ANONYMOUS.to_string())
    }

    /// Snapshot of joined users, in join order
    pub fn users(&self) -> Vec<User> {
        self.join_order
            .iter()
            .filter_map(|id| self.users.get(id))
            .cloned()
            .collect()
    }

    pub fn is_connected(&self, client_id: ClientId) -> bool {
        self.clients.contains_key(&client_id)
    }

    pub fn connection_count(&self) -> usize {
        self.clients.len()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Publish a message to every live connection
    pub fn broadcast(&self, msg: ServerMessage) {
        for client in self.clients.values() {
            if let Err(e) = client.send(msg.clone()) {
                debug!("Broadcast of {} to {} dropped: {}", msg.kind(), client.id, e);
            }
        }
    }

    /// Publish a message to one connection
    ///
    /// Returns false when the target is gone or backed up; delivery is
    /// fire-and-forget.
    pub fn send_to(&self, client_id: ClientId, msg: ServerMessage) -> bool {
        let Some(client) = self.clients.get(&client_id) else {
            debug!("Delivery to {} dropped, not connected", client_id);
            return false;
        };
        match client.send(msg) {
            Ok(()) => true,
            Err(e) => {
                debug!("Delivery to {} dropped: {}", client_id, e);
                false
            }
        }
    }
}
