//! ChatServer Actor implementation
//!
//! The central actor that owns all marketplace state: the connection
//! registry, product catalog, message log and typing set. Every command is
//! handled to completion (mutate, then publish) before the next one is
//! received, so no store is ever observed half-updated.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::error::AppError;
use crate::history::MessageLog;
use crate::message::ServerMessage;
use crate::models::{ChatMessage, Product, User};
use crate::registry::Registry;
use crate::router::{self, Routed, Sender, Stamp};
use crate::types::{ClientId, ProductId, Role};
use crate::typing::TypingSet;

/// Commands sent from handlers to the ChatServer actor
#[derive(Debug)]
pub enum ServerCommand {
    /// New connection accepted
    Connect {
        client_id: ClientId,
        sender: mpsc::Sender<ServerMessage>,
    },
    /// Connection closed
    Disconnect { client_id: ClientId },
    /// Announce username and role
    Join {
        client_id: ClientId,
        username: String,
        role: Role,
    },
    /// Public chat message
    SendMessage { client_id: ClientId, body: String },
    /// Typing indicator toggle
    Typing { client_id: ClientId, is_typing: bool },
    /// Direct message; `to` is the raw address the client sent
    PrivateMessage {
        client_id: ClientId,
        to: String,
        message: String,
    },
    /// Buyer question about a product
    ProductInquiry {
        client_id: ClientId,
        product_id: Option<ProductId>,
        message: String,
    },
    /// Seller answer to a customer
    SellerResponse {
        client_id: ClientId,
        customer_id: String,
        product_id: Option<ProductId>,
        message: String,
    },
    /// Read the message log
    GetMessages { reply: oneshot::Sender<Vec<ChatMessage>> },
    /// Read the joined user list
    GetUsers { reply: oneshot::Sender<Vec<User>> },
    /// Read the catalog
    GetProducts { reply: oneshot::Sender<Vec<Product>> },
}

/// Ask the actor a read-only question and wait for the answer
///
/// Commands are processed in order, so the answer reflects every command
/// sent before this one on the same channel.
pub async fn query<T>(
    cmd_tx: &mpsc::Sender<ServerCommand>,
    make: impl FnOnce(oneshot::Sender<T>) -> ServerCommand,
) -> Result<T, AppError> {
    let (reply, answer) = oneshot::channel();
    cmd_tx
        .send(make(reply))
        .await
        .map_err(|_| AppError::ChannelSend)?;
    answer.await.map_err(|_| AppError::ServerUnavailable)
}

/// The main ChatServer actor
pub struct ChatServer {
    /// Live connections and joined users
    registry: Registry,
    /// Products and their seller assignments
    catalog: Catalog,
    /// Recent public messages
    log: MessageLog,
    /// Connections currently typing
    typing: TypingSet,
    /// Last issued event id
    last_id: u64,
    /// Command receiver channel
    receiver: mpsc::Receiver<ServerCommand>,
}

impl ChatServer {
    /// Create a new ChatServer with the demo catalog
    pub fn new(receiver: mpsc::Receiver<ServerCommand>) -> Self {
        Self::with_catalog(receiver, Catalog::default())
    }

    /// Create a new ChatServer with a specific product set
    pub fn with_catalog(receiver: mpsc::Receiver<ServerCommand>, catalog: Catalog) -> Self {
        Self {
            registry: Registry::new(),
            catalog,
            log: MessageLog::new(),
            typing: TypingSet::new(),
            last_id: 0,
            receiver,
        }
    }

    /// Run the ChatServer event loop
    ///
    /// Continuously receives and processes commands until all senders are dropped.
    pub async fn run(mut self) {
        info!("ChatServer started with {} products", self.catalog.len());

        while let Some(cmd) = self.receiver.recv().await {
            self.handle_command(cmd);
        }

        info!("ChatServer shutting down");
    }

    /// Process a single command
    fn handle_command(&mut self, cmd: ServerCommand) {
        match cmd {
            ServerCommand::Connect { client_id, sender } => {
                self.handle_connect(client_id, sender);
            }
            ServerCommand::Disconnect { client_id } => {
                self.handle_disconnect(client_id);
            }
            ServerCommand::Join {
                client_id,
                username,
                role,
            } => {
                self.handle_join(client_id, username, role);
            }
            ServerCommand::SendMessage { client_id, body } => {
                self.handle_send_message(client_id, body);
            }
            ServerCommand::Typing {
                client_id,
                is_typing,
            } => {
                self.handle_typing(client_id, is_typing);
            }
            ServerCommand::PrivateMessage {
                client_id,
                to,
                message,
            } => {
                self.handle_private_message(client_id, to, message);
            }
            ServerCommand::ProductInquiry {
                client_id,
                product_id,
                message,
            } => {
                self.handle_product_inquiry(client_id, product_id, message);
            }
            ServerCommand::SellerResponse {
                client_id,
                customer_id,
                product_id,
                message,
            } => {
                self.handle_seller_response(client_id, customer_id, product_id, message);
            }
            ServerCommand::GetMessages { reply } => {
                let _ = reply.send(self.log.snapshot());
            }
            ServerCommand::GetUsers { reply } => {
                let _ = reply.send(self.registry.users());
            }
            ServerCommand::GetProducts { reply } => {
                let _ = reply.send(self.catalog.list());
            }
        }
    }

    /// Handle new connection
    fn handle_connect(&mut self, client_id: ClientId, sender: mpsc::Sender<ServerMessage>) {
        self.registry.connect(client_id, sender);
        debug!(
            "Client {} registered, total connections: {}",
            client_id,
            self.registry.connection_count()
        );
    }

    /// Handle connection close
    ///
    /// Products are released before anything is published, so the first
    /// event other clients see already reflects the departure.
    fn handle_disconnect(&mut self, client_id: ClientId) {
        let user = self.registry.disconnect(client_id);
        self.typing.stop(client_id);
        let released = self.catalog.release(client_id);

        let was_seller = user.as_ref().is_some_and(|u| u.role == Role::Seller);
        if was_seller || released > 0 {
            debug!("Released {} products owned by {}", released, client_id);
            self.publish_products();
        }

        if let Some(user) = user {
            info!("{} ({}) left the chat", user.username, user.role);
            self.registry.broadcast(ServerMessage::UserLeft(user));
        }

        self.publish_user_list();
        self.publish_typing();

        debug!(
            "Total connections: {}, joined users: {}",
            self.registry.connection_count(),
            self.registry.user_count()
        );
    }

    /// Handle identity announcement
    fn handle_join(&mut self, client_id: ClientId, username: String, role: Role) {
        if !self.registry.is_connected(client_id) {
            debug!("Join from disconnected client {} ignored", client_id);
            return;
        }

        let user = self.registry.join(client_id, username, role);

        if role == Role::Seller {
            let claimed = self.catalog.assign_unclaimed(client_id);
            debug!("Seller {} claimed {} products", client_id, claimed);
        }

        info!("{} ({}) joined the chat", user.username, user.role);

        self.publish_user_list();
        self.registry.broadcast(ServerMessage::UserJoined(user));
        self.publish_products();
    }

    /// Handle public chat message
    fn handle_send_message(&mut self, client_id: ClientId, body: String) {
        let stamp = self.stamp();
        let message = ChatMessage {
            id: stamp.id,
            sender: self.registry.display_name(client_id),
            sender_id: client_id,
            body,
            timestamp: stamp.timestamp,
        };

        self.log.append(message.clone());
        self.registry.broadcast(ServerMessage::ReceiveMessage(message));
    }

    /// Handle typing toggle; ignored for connections that never joined
    fn handle_typing(&mut self, client_id: ClientId, is_typing: bool) {
        let Some(user) = self.registry.lookup(client_id) else {
            debug!("Typing event from unjoined client {} ignored", client_id);
            return;
        };

        self.typing.set(client_id, user.username.clone(), is_typing);
        self.publish_typing();
    }

    /// Handle direct message
    fn handle_private_message(&mut self, client_id: ClientId, to: String, message: String) {
        let from = self.sender(client_id);
        let routed = router::route_private(ClientId::parse(&to), from, message, self.stamp());
        self.deliver(routed, ServerMessage::PrivateMessage);
    }

    /// Handle buyer inquiry; dropped silently when the product has no seller
    fn handle_product_inquiry(
        &mut self,
        client_id: ClientId,
        product_id: Option<ProductId>,
        message: String,
    ) {
        let from = self.sender(client_id);
        let stamp = self.stamp();
        let Some(routed) = router::route_inquiry(&self.catalog, product_id, from, message, stamp)
        else {
            debug!(
                "Inquiry from {} about {:?} dropped, no seller",
                client_id, product_id
            );
            return;
        };

        self.deliver(routed, ServerMessage::ProductInquiry);
    }

    /// Handle seller reply
    fn handle_seller_response(
        &mut self,
        client_id: ClientId,
        customer_id: String,
        product_id: Option<ProductId>,
        message: String,
    ) {
        let from = self.sender(client_id);
        let routed = router::route_response(
            ClientId::parse(&customer_id),
            product_id,
            from,
            message,
            self.stamp(),
        );
        self.deliver(routed, ServerMessage::SellerResponse);
    }

    /// Helper: Deliver a routed record to each of its recipients
    fn deliver<T: Clone>(&self, routed: Routed<T>, wrap: fn(T) -> ServerMessage) {
        for recipient in routed.recipients() {
            self.registry.send_to(recipient, wrap(routed.payload.clone()));
        }
    }

    /// Helper: Broadcast the full user list
    fn publish_user_list(&self) {
        let users = self.registry.users();
        self.registry.broadcast(ServerMessage::UserList { users });
    }

    /// Helper: Broadcast the full catalog
    fn publish_products(&self) {
        let products = self.catalog.list();
        self.registry.broadcast(ServerMessage::ProductsUpdate { products });
    }

    /// Helper: Broadcast everyone currently typing
    fn publish_typing(&self) {
        let usernames = self.typing.usernames();
        self.registry.broadcast(ServerMessage::TypingUsers { usernames });
    }

    /// Helper: Resolve the sender of an event, anonymous if never joined
    fn sender(&self, client_id: ClientId) -> Sender {
        Sender {
            id: client_id,
            name: self.registry.display_name(client_id),
        }
    }

    /// Helper: Issue the next event id with the current time
    fn stamp(&mut self) -> Stamp {
        self.last_id += 1;
        Stamp::now(self.last_id)
    }
}
