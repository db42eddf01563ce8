//! Shopfront Core - Shared types library.
//!
//! This crate provides common types used across all Shopfront components:
//! - `client` - REST transport and the catalog/order stores
//! - `storefront` - Catalog browsing and the session cart
//! - `admin` - Product and order administration view-models
//! - `cli` - Command-line front-end
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, products, orders and statuses
//! - [`notify`] - The notification surface view-models report to
//! - [`loading`] - The shared in-flight indicator of view-models

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod loading;
pub mod notify;
pub mod types;

pub use loading::{LoadingFlag, LoadingGuard};
pub use notify::{NoticeKind, Notification, Notifier, RecordingNotifier};
pub use types::*;
