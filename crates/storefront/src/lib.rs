//! Shopfront Storefront - shopper-facing catalog and cart.
//!
//! # Modules
//!
//! - [`catalog`] - Product listing with add-to-cart
//! - [`cart`] - The in-memory cart
//! - [`session`] - The shopper session that owns the cart

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod session;

pub use cart::Cart;
pub use catalog::CatalogBrowser;
pub use session::ShopSession;
