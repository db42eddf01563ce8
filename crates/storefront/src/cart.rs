//! In-memory shopping cart.

use shopfront_core::{Price, Product};

/// Ordered list of products the shopper has selected.
///
/// There is no quantity field: adding the same product twice means two units.
/// The cart is never persisted and never talks to the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<Product>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append a product. Duplicates are kept.
    pub fn add(&mut self, product: Product) {
        self.items.push(product);
    }

    /// Current contents in insertion order.
    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of the prices of every unit in the cart.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(|product| product.price).sum()
    }
}
