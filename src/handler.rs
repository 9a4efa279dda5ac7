//! WebSocket connection handler
//!
//! Handles individual client connections: WebSocket handshake,
//! message parsing, and bidirectional communication with the ChatServer.

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info, warn};

use crate::error::AppError;
use crate::message::{ClientMessage, ServerMessage};
use crate::server::ServerCommand;
use crate::types::ClientId;

/// Outbound queue depth per connection
const CLIENT_BUFFER_SIZE: usize = 64;

/// Accept connections forever, spawning a handler task for each
pub async fn accept_loop(listener: TcpListener, cmd_tx: mpsc::Sender<ServerCommand>) {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                info!("New connection from {}", addr);
                let cmd_tx = cmd_tx.clone();

                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, cmd_tx).await {
                        error!("Connection handler error: {}", e);
                    }
                });
            }
            Err(e) => {
                error!("Failed to accept connection: {}", e);
            }
        }
    }
}

/// Handle a new TCP connection
///
/// Performs WebSocket handshake, sets up bidirectional communication,
/// and manages the connection lifecycle. The transport close is the only
/// cleanup trigger.
pub async fn handle_connection(
    stream: TcpStream,
    cmd_tx: mpsc::Sender<ServerCommand>,
) -> Result<(), AppError> {
    let peer_addr = stream
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    debug!("New TCP connection from {}", peer_addr);

    // WebSocket handshake
    let ws_stream = tokio_tungstenite::accept_async(stream).await?;
    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    let client_id = ClientId::new();
    info!("Client {} connected from {}", client_id, peer_addr);

    // Channel for server -> client messages
    let (msg_tx, mut msg_rx) = mpsc::channel::<ServerMessage>(CLIENT_BUFFER_SIZE);

    // Tell the client its connection id before anything else can arrive
    let connected_msg = ServerMessage::Connected { client_id };
    let json = serde_json::to_string(&connected_msg)?;
    ws_sender.send(Message::Text(json.into())).await?;

    if cmd_tx
        .send(ServerCommand::Connect {
            client_id,
            sender: msg_tx,
        })
        .await
        .is_err()
    {
        error!("Failed to register client {} - server closed", client_id);
        return Err(AppError::ChannelSend);
    }

    let cmd_tx_read = cmd_tx.clone();

    // Read task (WebSocket -> ServerCommand)
    let read_task = tokio::spawn(async move {
        while let Some(msg_result) = ws_receiver.next().await {
            match msg_result {
                Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(client_msg) => {
                        let cmd = client_message_to_command(client_id, client_msg);
                        if cmd_tx_read.send(cmd).await.is_err() {
                            debug!("Server closed, ending read task for {}", client_id);
                            break;
                        }
                    }
                    Err(e) => {
                        // Never reported back to the client
                        warn!("Invalid message from {}: {}", client_id, e);
                    }
                },
                Ok(Message::Close(_)) => {
                    debug!("Client {} sent close frame", client_id);
                    break;
                }
                Ok(Message::Ping(_)) => {
                    // Pong is handled automatically by tungstenite
                    debug!("Ping from {}", client_id);
                }
                Ok(_) => {
                    // Binary, pong and raw frames - ignore
                }
                Err(e) => {
                    error!("WebSocket error for {}: {}", client_id, e);
                    break;
                }
            }
        }
        debug!("Read task ended for {}", client_id);
    });

    // Write task (ServerMessage -> WebSocket)
    let write_task = tokio::spawn(async move {
        while let Some(msg) = msg_rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if ws_sender.send(Message::Text(json.into())).await.is_err() {
                        debug!("WebSocket send failed, ending write task");
                        break;
                    }
                }
                Err(e) => {
                    error!("Failed to serialize {}: {}", msg.kind(), e);
                }
            }
        }
        debug!("Write task ended for client");

        let _ = ws_sender.close().await;
    });

    // Stop forwarding once either side is done; a command that slips past
    // the abort is ignored by the server after Disconnect. The write task
    // ends by itself once the server drops this client's sender.
    let read_abort = read_task.abort_handle();

    tokio::select! {
        _ = read_task => {
            debug!("Read task completed for {}", client_id);
        }
        _ = write_task => {
            debug!("Write task completed for {}", client_id);
        }
    }
    read_abort.abort();

    let _ = cmd_tx.send(ServerCommand::Disconnect { client_id }).await;

    info!("Client {} disconnected", client_id);

    Ok(())
}

/// Convert a ClientMessage to a ServerCommand
fn client_message_to_command(client_id: ClientId, msg: ClientMessage) -> ServerCommand {
    match msg {
        ClientMessage::Join { username, role } => ServerCommand::Join {
            client_id,
            username: username.unwrap_or_default(),
            role,
        },
        ClientMessage::SendMessage { body } => ServerCommand::SendMessage { client_id, body },
        ClientMessage::Typing { is_typing } => ServerCommand::Typing {
            client_id,
            is_typing,
        },
        ClientMessage::PrivateMessage { to, message } => ServerCommand::PrivateMessage {
            client_id,
            to,
            message,
        },
        ClientMessage::ProductInquiry {
            product_id,
            message,
        } => ServerCommand::ProductInquiry {
            client_id,
            product_id,
            message,
        },
        ClientMessage::SellerResponse {
            customer_id,
            product_id,
            message,
        } => ServerCommand::SellerResponse {
            client_id,
            customer_id,
            product_id,
            message,
        },
    }
}
