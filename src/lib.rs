//! Real-time Marketplace Chat Server Library
//!
//! A single in-memory server built with tokio-tungstenite that relays user
//! presence, public chat, typing indicators and buyer/seller product
//! inquiries to connected clients.
//!
//! # Features
//! - WebSocket connection handling
//! - Join with username and role (customer or seller)
//! - Public chat with a bounded history of 100 messages
//! - Typing indicators
//! - Private messages between connections
//! - Product inquiries routed to the product's seller, replies routed back
//! - First seller to join claims every unowned product
//! - Read-only HTTP snapshots of messages, users and products
//!
//! # Architecture
//! Uses the Actor pattern with `mpsc` channels:
//! - `ChatServer` is the central actor owning every store
//! - Each connection has a `handler` task communicating with the server
//! - No locks needed - all state access goes through message passing
//!
//! # Example
//! ```ignore
//! use tokio::net::TcpListener;
//! use tokio::sync::mpsc;
//! use market_chat::{accept_loop, ChatServer};
//!
//! #[tokio::main]
//! async fn main() {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await.unwrap();
//!     let (cmd_tx, cmd_rx) = mpsc::channel(256);
//!
//!     tokio::spawn(ChatServer::new(cmd_rx).run());
//!     accept_loop(listener, cmd_tx).await;
//! }
//! ```

pub mod api;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod handler;
pub mod history;
pub mod message;
pub mod models;
pub mod registry;
pub mod router;
pub mod server;
pub mod types;
pub mod typing;

// Re-export main types for convenience
pub use catalog::Catalog;
pub use client::Client;
pub use config::Config;
pub use error::{AppError, SendError};
pub use handler::{accept_loop, handle_connection};
pub use history::MessageLog;
pub use message::{ClientMessage, ServerMessage};
pub use models::{ChatMessage, Inquiry, PrivateMessage, Product, SellerReply, User};
pub use registry::Registry;
pub use server::{ChatServer, ServerCommand};
pub use types::{ClientId, ProductId, Role};
pub use typing::TypingSet;
