//! Inquiry and direct-message routing
//!
//! Builds the record for a targeted event and decides who receives it.
//! Targeted events go to the target and are echoed back to the sender as
//! local confirmation. Nothing here touches a socket; the server actor
//! performs the actual delivery.

use chrono::{DateTime, Utc};

use crate::catalog::Catalog;
use crate::models::{Inquiry, PrivateMessage, SellerReply};
use crate::types::{ClientId, ProductId};

/// Identity stamped on every outbound record
#[derive(Debug, Clone, Copy)]
pub struct Stamp {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
}

impl Stamp {
    pub fn now(id: u64) -> Self {
        Self {
            id,
            timestamp: Utc::now(),
        }
    }
}

/// Who sent an event, as resolved by the registry
#[derive(Debug, Clone)]
pub struct Sender {
    pub id: ClientId,
    pub name: String,
}

/// A record and the connections it should reach
#[derive(Debug, Clone)]
pub struct Routed<T> {
    pub payload: T,
    /// Intended recipient; None when the address could not be parsed
    pub target: Option<ClientId>,
    /// Originator, always echoed
    pub sender: ClientId,
}

impl<T> Routed<T> {
    /// Distinct recipients: the target (unless it is the sender), then the sender
    pub fn recipients(&self) -> Vec<ClientId> {
        let mut recipients = Vec::with_capacity(2);
        if let Some(target) = self.target.filter(|t| *t != self.sender) {
            recipients.push(target);
        }
        recipients.push(self.sender);
        recipients
    }
}

/// Relay a buyer's question to the product's current seller
///
/// Returns None (silent drop) when the product is unknown or unowned.
pub fn route_inquiry(
    catalog: &Catalog,
    product_id: Option<ProductId>,
    from: Sender,
    message: String,
    stamp: Stamp,
) -> Option<Routed<Inquiry>> {
    let product_id = product_id?;
    let seller_id = catalog.seller_of(product_id)?;

    Some(Routed {
        payload: Inquiry {
            id: stamp.id,
            product_id,
            customer_id: from.id,
            customer_name: from.name,
            message,
            timestamp: stamp.timestamp,
        },
        target: Some(seller_id),
        sender: from.id,
    })
}

/// Relay a seller's answer back to the customer
///
/// The sender is not checked against the product's owner.
pub fn route_response(
    customer_id: Option<ClientId>,
    product_id: Option<ProductId>,
    from: Sender,
    message: String,
    stamp: Stamp,
) -> Routed<SellerReply> {
    Routed {
        payload: SellerReply {
            id: stamp.id,
            product_id,
            seller_id: from.id,
            seller_name: from.name,
            message,
            timestamp: stamp.timestamp,
        },
        target: customer_id,
        sender: from.id,
    }
}

/// Direct message to another connection
pub fn route_private(
    to: Option<ClientId>,
    from: Sender,
    message: String,
    stamp: Stamp,
) -> Routed<PrivateMessage> {
    Routed {
        payload: PrivateMessage {
            id: stamp.id,
            sender: from.name,
            sender_id: from.id,
            message,
            timestamp: stamp.timestamp,
            is_private: true,
        },
        target: to,
        sender: from.id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sender(name: &str) -> Sender {
        Sender {
            id: ClientId::new(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_inquiry_to_unowned_product_dropped() {
        let catalog = Catalog::default();
        let routed = route_inquiry(
            &catalog,
            Some(ProductId(1)),
            sender("Carol"),
            "is this available?".to_string(),
            Stamp::now(1),
        );
        assert!(routed.is_none());
    }

    #[test]
    fn test_inquiry_to_unknown_product_dropped() {
        let mut catalog = Catalog::default();
        catalog.assign_unclaimed(ClientId::new());

        let missing = route_inquiry(&catalog, Some(ProductId(99)), sender("C"), String::new(), Stamp::now(1));
        assert!(missing.is_none());
        let absent = route_inquiry(&catalog, None, sender("C"), String::new(), Stamp::now(2));
        assert!(absent.is_none());
    }

    #[test]
    fn test_inquiry_reaches_seller_and_customer() {
        let mut catalog = Catalog::default();
        let seller = ClientId::new();
        catalog.assign_unclaimed(seller);
        let customer = sender("Carol");
        let customer_id = customer.id;

        let routed = route_inquiry(
            &catalog,
            Some(ProductId(1)),
            customer,
            "is this available?".to_string(),
            Stamp::now(5),
        )
        .unwrap();

        assert_eq!(routed.recipients(), vec![seller, customer_id]);
        assert_eq!(routed.payload.customer_id, customer_id);
        assert_eq!(routed.payload.customer_name, "Carol");
        assert_eq!(routed.payload.product_id, ProductId(1));
        assert_eq!(routed.payload.id, 5);
    }

    #[test]
    fn test_seller_inquiring_own_product_delivered_once() {
        let mut catalog = Catalog::default();
        let seller = sender("Sam");
        catalog.assign_unclaimed(seller.id);
        let seller_id = seller.id;

        let routed = route_inquiry(&catalog, Some(ProductId(2)), seller, "hi".to_string(), Stamp::now(1))
            .unwrap();
        assert_eq!(routed.recipients(), vec![seller_id]);
    }

    #[test]
    fn test_response_is_not_checked_against_owner() {
        let customer = ClientId::new();
        let impostor = sender("Mallory");
        let impostor_id = impostor.id;

        let routed = route_response(
            Some(customer),
            Some(ProductId(1)),
            impostor,
            "yes".to_string(),
            Stamp::now(3),
        );

        assert_eq!(routed.payload.seller_id, impostor_id);
        assert_eq!(routed.payload.seller_name, "Mallory");
        assert_eq!(routed.recipients(), vec![customer, impostor_id]);
    }

    #[test]
    fn test_private_with_bad_address_only_echoes() {
        let from = sender("Alice");
        let from_id = from.id;
        let routed = route_private(None, from, "psst".to_string(), Stamp::now(1));

        assert!(routed.payload.is_private);
        assert_eq!(routed.recipients(), vec![from_id]);
    }
}
