//! Order store: listing orders and changing their status.

use async_trait::async_trait;
use serde::Serialize;
use shopfront_core::{Order, OrderId, OrderStatus};
use tracing::{debug, instrument};

use crate::error::ApiResult;
use crate::http::ApiClient;

/// Operations on the remote order collection.
///
/// No transition rules are enforced here: any status may be requested for
/// any order and the backend decides whether it is legal.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Fetch every order.
    async fn list_all(&self) -> ApiResult<Vec<Order>>;

    /// Request a status change for one order.
    async fn set_status(&self, id: &OrderId, status: &OrderStatus) -> ApiResult<()>;
}

#[derive(Serialize)]
struct StatusUpdate<'a> {
    status: &'a OrderStatus,
}

/// [`OrderStore`] backed by the REST API.
#[derive(Debug, Clone)]
pub struct HttpOrderStore {
    api: ApiClient,
}

impl HttpOrderStore {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl OrderStore for HttpOrderStore {
    #[instrument(skip(self))]
    async fn list_all(&self) -> ApiResult<Vec<Order>> {
        let orders: Vec<Order> = self.api.get(&["orders"]).await?;
        debug!(count = orders.len(), "Fetched orders");
        Ok(orders)
    }

    #[instrument(skip(self), fields(id = %id, status = %status))]
    async fn set_status(&self, id: &OrderId, status: &OrderStatus) -> ApiResult<()> {
        self.api
            .patch(&["orders", id.as_str(), "status"], &StatusUpdate { status })
            .await
    }
}
