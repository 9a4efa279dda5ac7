//! Basic type definitions for the marketplace chat server
//!
//! Provides newtype wrappers for type safety:
//! - `ClientId`: UUID-based connection identifier
//! - `ProductId`: numeric catalog identifier
//! - `Role`: what a joined user announced themselves as

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Unique connection identifier (newtype pattern)
///
/// Wraps a UUID v4 assigned when the socket is accepted. It is the primary
/// key for a user and serializes as the bare UUID string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(pub Uuid);

impl ClientId {
    /// Create a new random client ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a client ID sent by a peer
    ///
    /// Returns None for anything that is not a UUID; such targets are
    /// treated as already disconnected.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ClientId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Catalog product identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role announced on join
///
/// Only `"seller"` grants seller behaviour; anything else, including null
/// or an unknown name, is treated as a customer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Customer,
    Seller,
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(match raw.as_deref() {
            Some("seller") => Role::Seller,
            _ => Role::Customer,
        })
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Customer => f.write_str("customer"),
            Role::Seller => f.write_str("seller"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_id_unique() {
        let id1 = ClientId::new();
        let id2 = ClientId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_client_id_parse() {
        let id = ClientId::new();
        assert_eq!(ClientId::parse(&id.to_string()), Some(id));
        assert_eq!(ClientId::parse("not-a-socket"), None);
        assert_eq!(ClientId::parse(""), None);
    }

    #[test]
    fn test_client_id_serializes_as_string() {
        let id = ClientId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
    }

    #[test]
    fn test_role_wire_names() {
        assert_eq!(serde_json::to_string(&Role::Seller).unwrap(), "\"seller\"");
        let role: Role = serde_json::from_str("\"customer\"").unwrap();
        assert_eq!(role, Role::Customer);
        assert_eq!(Role::default(), Role::Customer);
    }

    #[test]
    fn test_unknown_role_falls_back_to_customer() {
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Customer);
        let role: Role = serde_json::from_str("null").unwrap();
        assert_eq!(role, Role::Customer);
        let role: Role = serde_json::from_str("\"seller\"").unwrap();
        assert_eq!(role, Role::Seller);
    }
}
