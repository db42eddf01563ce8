//! Subcommand implementations.
//!
//! Each command builds the view-model it needs, drives it, and prints the
//! resulting listing. Outcomes the user must see are reported through the
//! view-model's notifier; the returned error only decides the exit code.

pub mod cart;
pub mod catalog;
pub mod orders;
pub mod products;

use std::sync::Arc;

use shopfront_admin::AdminError;
use shopfront_client::{ApiClient, ApiError, CatalogStore, HttpCatalogStore, HttpOrderStore, OrderStore};
use shopfront_core::Notifier;
use thiserror::Error;

use crate::terminal::TerminalNotifier;

/// Errors that end a command with a non-zero exit status.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Admin(#[from] AdminError),

    /// The product to edit is not in the current listing.
    #[error("No product with id {0}")]
    UnknownProduct(String),

    /// A storefront fetch failed; the user has already been notified.
    #[error(transparent)]
    Store(#[from] ApiError),
}

/// Backend connection and presentation shared by all commands.
#[derive(Debug, Clone)]
pub struct Context {
    api: ApiClient,
    notifier: Arc<TerminalNotifier>,
}

impl Context {
    #[must_use]
    pub fn new(api: ApiClient, notifier: TerminalNotifier) -> Self {
        Self {
            api,
            notifier: Arc::new(notifier),
        }
    }

    fn catalog_store(&self) -> Arc<dyn CatalogStore> {
        Arc::new(HttpCatalogStore::new(self.api.clone()))
    }

    fn order_store(&self) -> Arc<dyn OrderStore> {
        Arc::new(HttpOrderStore::new(self.api.clone()))
    }

    fn notifier(&self) -> Arc<dyn Notifier> {
        self.notifier.clone()
    }
}
