//! Shopper session.
//!
//! A [`ShopSession`] is created when a shopper starts browsing and dropped
//! when they leave; the cart lives exactly as long as the session. Two
//! sessions never share a cart.

use uuid::Uuid;

use crate::cart::Cart;

/// State scoped to one shopper, from session start to session end.
#[derive(Debug)]
pub struct ShopSession {
    id: Uuid,
    cart: Cart,
}

impl ShopSession {
    /// Start a session with an empty cart.
    #[must_use]
    pub fn start() -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(session_id = %id, "Shop session started");
        Self {
            id,
            cart: Cart::new(),
        }
    }

    /// Session identifier, for log correlation.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }
}

impl Drop for ShopSession {
    fn drop(&mut self) {
        tracing::debug!(
            session_id = %self.id,
            discarded_items = self.cart.len(),
            "Shop session ended"
        );
    }
}
