//! Product catalog
//!
//! A fixed list of products created at startup. Seller ownership is the
//! only mutable part: the first seller to join claims every unowned
//! product, and a departing connection releases everything it owned.

use crate::models::Product;
use crate::types::{ClientId, ProductId};

/// Ordered product list with seller assignments
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from an initial product set
    ///
    /// Ownership is bound to live connections, so any seller carried in
    /// the input is cleared.
    pub fn new(mut products: Vec<Product>) -> Self {
        for product in &mut products {
            product.seller_id = None;
        }
        Self { products }
    }

    /// Assign every unowned product to this seller
    ///
    /// Returns the number of products claimed. A later seller finds
    /// nothing left and claims zero.
    pub fn assign_unclaimed(&mut self, seller_id: ClientId) -> usize {
        let mut claimed = 0;
        for product in self.products.iter_mut().filter(|p| p.seller_id.is_none()) {
            product.seller_id = Some(seller_id);
            claimed += 1;
        }
        claimed
    }

    /// Return every product owned by this connection to the unowned pool
    pub fn release(&mut self, seller_id: ClientId) -> usize {
        let mut released = 0;
        for product in self
            .products
            .iter_mut()
            .filter(|p| p.seller_id == Some(seller_id))
        {
            product.seller_id = None;
            released += 1;
        }
        released
    }

    pub fn get(&self, product_id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// Current seller of a product, if it exists and is owned
    pub fn seller_of(&self, product_id: ProductId) -> Option<ClientId> {
        self.get(product_id).and_then(|p| p.seller_id)
    }

    /// Point-in-time copy of the whole catalog
    pub fn list(&self) -> Vec<Product> {
        self.products.clone()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    /// The demo storefront
    fn default() -> Self {
        Self::new(vec![
            Product::new(1, "Laptop", 999.99, "High-performance laptop"),
            Product::new(2, "Smartphone", 599.99, "Latest smartphone"),
            Product::new(3, "Headphones", 99.99, "Wireless headphones"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_unowned() {
        let catalog = Catalog::default();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.list().iter().all(|p| p.seller_id.is_none()));
        assert_eq!(catalog.get(ProductId(1)).unwrap().name, "Laptop");
    }

    #[test]
    fn test_first_seller_claims_everything() {
        let mut catalog = Catalog::default();
        let seller_a = ClientId::new();
        let seller_b = ClientId::new();

        assert_eq!(catalog.assign_unclaimed(seller_a), 3);
        assert_eq!(catalog.assign_unclaimed(seller_b), 0);

        assert!(catalog
            .list()
            .iter()
            .all(|p| p.seller_id == Some(seller_a)));
    }

    #[test]
    fn test_release_returns_products_to_pool() {
        let mut catalog = Catalog::default();
        let seller_a = ClientId::new();
        let seller_b = ClientId::new();
        catalog.assign_unclaimed(seller_a);

        assert_eq!(catalog.release(seller_b), 0);
        assert_eq!(catalog.release(seller_a), 3);
        assert!(catalog.seller_of(ProductId(2)).is_none());

        // Released products are claimable again
        assert_eq!(catalog.assign_unclaimed(seller_b), 3);
        assert_eq!(catalog.seller_of(ProductId(2)), Some(seller_b));
    }

    #[test]
    fn test_new_starts_unowned() {
        let mut first = Product::new(1, "A", 1.0, "");
        first.seller_id = Some(ClientId::new());
        let mut catalog = Catalog::new(vec![first, Product::new(2, "B", 2.0, "")]);

        assert!(catalog.seller_of(ProductId(1)).is_none());
        let seller = ClientId::new();
        assert_eq!(catalog.assign_unclaimed(seller), 2);
        assert_eq!(catalog.seller_of(ProductId(1)), Some(seller));
        assert_eq!(catalog.seller_of(ProductId(2)), Some(seller));
    }

    #[test]
    fn test_list_is_snapshot() {
        let mut catalog = Catalog::default();
        let before = catalog.list();
        catalog.assign_unclaimed(ClientId::new());
        assert!(before.iter().all(|p| p.seller_id.is_none()));
    }

    #[test]
    fn test_unknown_product() {
        let catalog = Catalog::default();
        assert!(catalog.get(ProductId(42)).is_none());
        assert!(catalog.seller_of(ProductId(42)).is_none());
    }
}
