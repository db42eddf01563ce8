//! Shopfront admin view-models.
//!
//! Screen state and actions for managing the catalog and processing orders.
//! Each view-model owns its listing, talks to the backend through a store
//! trait and reports outcomes through a [`Notifier`](shopfront_core::Notifier).
//! The listing is always a snapshot of the backend; mutations are followed by
//! a full reload instead of local patching.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod image;
pub mod orders;
pub mod products;

pub use error::{AdminError, AdminResult};
pub use orders::{OrderAdmin, StatusBadge, StatusCounts};
pub use products::{ProductAdmin, delete_prompt};
