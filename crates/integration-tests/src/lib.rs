//! Integration tests for Shopfront.
//!
//! Each test starts its own [`TestBackend`], an in-process axum server bound
//! to an ephemeral port on `127.0.0.1`, and drives the real stores and
//! view-models against it over HTTP.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let backend = TestBackend::start().await?;
//! let pen = backend.seed_product("Pen", "Blue pen", 150);
//! let catalog = HttpCatalogStore::new(backend.api_client()?);
//! assert_eq!(catalog.list_all().await?, vec![pen]);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;

use std::net::SocketAddr;

use shopfront_client::{ApiClient, ApiResult, ClientConfig, ConfigError};
use shopfront_core::{
    Buyer, Order, OrderId, OrderItem, OrderStatus, Price, Product, ProductDraft, ProductId,
    ProductRef,
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub use backend::{BackendState, RequestCounts};

/// A running fake backend. Stops when dropped.
#[derive(Debug)]
pub struct TestBackend {
    addr: SocketAddr,
    state: BackendState,
    server: JoinHandle<()>,
}

impl TestBackend {
    /// Bind an ephemeral port and start serving.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub async fn start() -> std::io::Result<Self> {
        let state = BackendState::default();
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let app = backend::router(state.clone());
        let server = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "Fake backend stopped");
            }
        });

        tracing::debug!(%addr, "Fake backend listening");
        Ok(Self {
            addr,
            state,
            server,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Client configuration pointing at this backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is rejected.
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        ClientConfig::new(&self.base_url())
    }

    /// REST client pointing at this backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built.
    pub fn api_client(&self) -> ApiResult<ApiClient> {
        let config = self
            .client_config()
            .map_err(|e| shopfront_client::ApiError::Transport(e.to_string()))?;
        ApiClient::new(&config)
    }

    #[must_use]
    pub const fn state(&self) -> &BackendState {
        &self.state
    }

    #[must_use]
    pub fn counts(&self) -> RequestCounts {
        self.state.counts()
    }

    /// Add a product without going through HTTP.
    pub fn seed_product(&self, name: &str, description: &str, price_cents: i64) -> Product {
        self.state.insert_product(ProductDraft::new(
            name,
            description,
            Price::from_cents(price_cents),
        ))
    }

    /// Add an order referencing products by id, without going through HTTP.
    pub fn seed_order(&self, id: &str, buyer: Buyer, lines: &[(&ProductId, u32)], status: OrderStatus) -> Order {
        let order = Order {
            id: OrderId::new(id),
            buyer,
            items: lines
                .iter()
                .map(|&(product, quantity)| OrderItem {
                    product: ProductRef::Id(product.clone()),
                    quantity,
                })
                .collect(),
            status,
            total_amount: None,
            created_at: None,
        };
        self.state.insert_order(order.clone());
        order
    }
}

impl Drop for TestBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}
