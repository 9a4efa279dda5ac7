//! Message protocol definitions
//!
//! JSON-based bidirectional message protocol using Serde's tagged enum
//! for type-safe serialization/deserialization. Event names are snake_case
//! in the `type` field; payload fields are camelCase.

use serde::{Deserialize, Serialize};

use crate::models::{ChatMessage, Inquiry, PrivateMessage, Product, SellerReply, User};
use crate::types::{ClientId, ProductId, Role};

/// Client → Server message
///
/// Payloads are not validated: missing fields fall back to their defaults
/// and flow into the published records as-is.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Announce identity and role
    #[serde(alias = "user_join")]
    Join {
        #[serde(default)]
        username: Option<String>,
        #[serde(default)]
        role: Role,
    },
    /// Public chat message
    SendMessage {
        #[serde(default, alias = "message")]
        body: String,
    },
    /// Typing indicator toggle
    #[serde(rename_all = "camelCase")]
    Typing {
        #[serde(default, alias = "is_typing")]
        is_typing: bool,
    },
    /// Direct message to another connection
    PrivateMessage {
        #[serde(default)]
        to: String,
        #[serde(default)]
        message: String,
    },
    /// Buyer question about a product
    #[serde(rename_all = "camelCase")]
    ProductInquiry {
        #[serde(default, alias = "product_id")]
        product_id: Option<ProductId>,
        #[serde(default)]
        message: String,
    },
    /// Seller answer to a customer
    #[serde(rename_all = "camelCase")]
    SellerResponse {
        #[serde(default, alias = "customer_id")]
        customer_id: String,
        #[serde(default, alias = "product_id")]
        product_id: Option<ProductId>,
        #[serde(default)]
        message: String,
    },
}

/// Server → Client message
///
/// Snapshot events (`user_list`, `products_update`, `typing_users`) carry
/// the full current state and replace the client's copy wholesale.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection accepted, connection ID issued
    #[serde(rename_all = "camelCase")]
    Connected { client_id: ClientId },
    /// All joined users
    UserList { users: Vec<User> },
    /// A user joined
    UserJoined(User),
    /// A joined user disconnected
    UserLeft(User),
    /// Whole catalog with current seller assignments
    ProductsUpdate { products: Vec<Product> },
    /// New public chat message
    ReceiveMessage(ChatMessage),
    /// Names of everyone currently typing
    TypingUsers { usernames: Vec<String> },
    /// Direct message (target and echo)
    PrivateMessage(PrivateMessage),
    /// Product inquiry (seller and echo)
    ProductInquiry(Inquiry),
    /// Seller reply (customer and echo)
    SellerResponse(SellerReply),
}

impl ServerMessage {
    /// Event name as it appears in the `type` field
    pub fn kind(&self) -> &'static str {
        match self {
            ServerMessage::Connected { .. } => "connected",
            ServerMessage::UserList { .. } => "user_list",
            ServerMessage::UserJoined(_) => "user_joined",
            ServerMessage::UserLeft(_) => "user_left",
            ServerMessage::ProductsUpdate { .. } => "products_update",
            ServerMessage::ReceiveMessage(_) => "receive_message",
            ServerMessage::TypingUsers { .. } => "typing_users",
            ServerMessage::PrivateMessage(_) => "private_message",
            ServerMessage::ProductInquiry(_) => "product_inquiry",
            ServerMessage::SellerResponse(_) => "seller_response",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_deserialize() {
        let json = r#"{"type": "join", "username": "Alice", "role": "seller"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        match msg {
            ClientMessage::Join { username, role } => {
                assert_eq!(username.as_deref(), Some("Alice"));
                assert_eq!(role, Role::Seller);
            }
            _ => panic!("Wrong variant"),
        }
    }

    #[test]
    fn test_user_join_alias_and_default_role() {
        let json = r#"{"type": "user_join", "username": "Bob"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert!(matches!(
            msg,
            ClientMessage::Join { role: Role::Customer, .. }
        ));
    }

    #[test]
    fn test_join_with_null_or_unknown_fields_still_parses() {
        let json = r#"{"type": "join", "username": null, "role": null}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert!(matches!(
            msg,
            ClientMessage::Join {
                username: None,
                role: Role::Customer
            }
        ));

        let json = r#"{"type": "join", "username": "Eve", "role": "admin"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert!(matches!(
            msg,
            ClientMessage::Join { role: Role::Customer, .. }
        ));
    }

    #[test]
    fn test_missing_fields_default() {
        let json = r#"{"type": "product_inquiry"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        match msg {
            ClientMessage::ProductInquiry { product_id, message } => {
                assert!(product_id.is_none());
                assert!(message.is_empty());
            }
            _ => panic!("Wrong variant"),
        }
    }

    #[test]
    fn test_seller_response_camel_case() {
        let json = r#"{"type": "seller_response", "customerId": "abc", "productId": 1, "message": "yes"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        match msg {
            ClientMessage::SellerResponse {
                customer_id,
                product_id,
                message,
            } => {
                assert_eq!(customer_id, "abc");
                assert_eq!(product_id, Some(ProductId(1)));
                assert_eq!(message, "yes");
            }
            _ => panic!("Wrong variant"),
        }
    }

    #[test]
    fn test_typing_payload() {
        let json = r#"{"type": "typing", "isTyping": true}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert!(matches!(msg, ClientMessage::Typing { is_typing: true }));
    }

    #[test]
    fn test_send_message_body_alias() {
        let json = r#"{"type": "send_message", "message": "hello"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        match msg {
            ClientMessage::SendMessage { body } => assert_eq!(body, "hello"),
            _ => panic!("Wrong variant"),
        }
    }

    #[test]
    fn test_unknown_type_rejected() {
        let json = r#"{"type": "make_offer"}"#;
        assert!(serde_json::from_str::<ClientMessage>(json).is_err());
    }

    #[test]
    fn test_user_joined_is_flat() {
        let id = ClientId::new();
        let msg = ServerMessage::UserJoined(User {
            id,
            username: "Alice".to_string(),
            role: Role::Seller,
        });
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "user_joined");
        assert_eq!(json["id"], id.to_string());
        assert_eq!(json["username"], "Alice");
        assert_eq!(json["role"], "seller");
    }

    #[test]
    fn test_connected_serialize() {
        let id = ClientId::new();
        let msg = ServerMessage::Connected { client_id: id };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"connected\""));
        assert!(json.contains(&format!("\"clientId\":\"{}\"", id)));
    }

    #[test]
    fn test_kind_matches_tag() {
        let msg = ServerMessage::TypingUsers {
            usernames: vec!["Alice".to_string()],
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], msg.kind());
    }
}
