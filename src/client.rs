//! Client struct definition
//!
//! Represents one live connection and its outbound communication channel.
//! Identity (username, role) lives in the registry, not here: a connection
//! exists before it joins and may never join at all.

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::error::SendError;
use crate::message::ServerMessage;
use crate::types::ClientId;

/// Connected socket
#[derive(Debug)]
pub struct Client {
    /// Transport-assigned identifier for this connection
    pub id: ClientId,
    /// Server → Client message channel
    pub sender: mpsc::Sender<ServerMessage>,
}

impl Client {
    /// Create a new client with the given ID and sender channel
    pub fn new(id: ClientId, sender: mpsc::Sender<ServerMessage>) -> Self {
        Self { id, sender }
    }

    /// Queue a message for this client without waiting
    ///
    /// A client whose queue is full is skipped rather than waited on, so
    /// one slow reader never holds up the server.
    pub fn send(&self, msg: ServerMessage) -> Result<(), SendError> {
        self.sender.try_send(msg).map_err(|e| match e {
            TrySendError::Full(_) => SendError::QueueFull,
            TrySendError::Closed(_) => SendError::ChannelClosed,
        })
    }
}
