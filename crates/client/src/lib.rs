//! Shopfront Client - REST transport and stores.
//!
//! This crate talks to the backend. It provides:
//! - [`ApiClient`] - JSON-over-HTTP transport built on `reqwest`
//! - [`CatalogStore`] / [`HttpCatalogStore`] - product CRUD
//! - [`OrderStore`] / [`HttpOrderStore`] - order listing and status changes
//! - [`ClientConfig`] - backend URL, timeout and token from the environment
//!
//! Stores never cache: each call is a single round trip, and failures are
//! returned as [`ApiError`] without interpretation.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_client::{ApiClient, CatalogStore, ClientConfig, HttpCatalogStore};
//!
//! let api = ApiClient::new(&ClientConfig::from_env()?)?;
//! let catalog = HttpCatalogStore::new(api);
//! let products = catalog.list_all().await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod http;
pub mod orders;

pub use catalog::{CatalogStore, HttpCatalogStore};
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, ApiResult};
pub use http::ApiClient;
pub use orders::{HttpOrderStore, OrderStore};
