//! Wire records
//!
//! Payloads carried inside `ServerMessage` events and returned by the HTTP
//! query surface. Field names are camelCase on the wire so browser clients
//! read `senderId`, `customerId`, `sellerId` and `productId` directly.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::{ClientId, ProductId, Role};

/// A joined user, keyed by the connection that announced it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: ClientId,
    pub username: String,
    pub role: Role,
}

/// A sellable catalog item
///
/// `seller_id` is null until a seller connection claims it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub seller_id: Option<ClientId>,
}

impl Product {
    pub fn new(id: u64, name: &str, price: f64, description: &str) -> Self {
        Self {
            id: ProductId(id),
            name: name.to_string(),
            price,
            description: description.to_string(),
            seller_id: None,
        }
    }
}

/// Public chat message kept in the message log
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: u64,
    pub sender: String,
    pub sender_id: ClientId,
    pub body: String,
    pub timestamp: DateTime<Utc>,
}

/// Direct message between two connections
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivateMessage {
    pub id: u64,
    pub sender: String,
    pub sender_id: ClientId,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub is_private: bool,
}

/// Buyer question about a product, relayed to its seller
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: u64,
    pub product_id: ProductId,
    pub customer_id: ClientId,
    pub customer_name: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Seller answer to an inquiry, relayed to the customer
///
/// `product_id` is whatever the replying client sent, unchecked.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerReply {
    pub id: u64,
    pub product_id: Option<ProductId>,
    pub seller_id: ClientId,
    pub seller_name: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}
