//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers for the catalog and order domain.

pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod status;

pub use id::*;
pub use order::{Buyer, Order, OrderItem, ProductRef, User};
pub use price::Price;
pub use product::{Product, ProductDraft};
pub use status::OrderStatus;
