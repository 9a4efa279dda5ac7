//! Error types for the marketplace chat server
//!
//! Defines application-level errors and message send errors.
//! Uses thiserror for ergonomic error definitions.
//!
//! None of these are ever reported to a WebSocket client: routing failures
//! degrade to silent drops, and only transport or startup failures surface.

use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    /// WebSocket protocol error (fatal for the connection)
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error (fatal)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Channel send error (fatal - internal channel broken)
    #[error("Channel send error")]
    ChannelSend,

    /// The server actor dropped a query without answering
    #[error("Chat server unavailable")]
    ServerUnavailable,

    /// Configured client origin is not a valid header value
    #[error("Invalid client origin: {0}")]
    InvalidOrigin(String),
}

/// Message send errors
///
/// Occurs when a client's outbound queue is closed or full.
#[derive(Debug, Error)]
pub enum SendError {
    /// The receiving end of the channel has been closed
    #[error("Channel closed")]
    ChannelClosed,

    /// The client is not reading fast enough; the message was dropped
    #[error("Queue full")]
    QueueFull,
}
