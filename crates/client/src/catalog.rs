//! Catalog store: product CRUD against `/products`.

use async_trait::async_trait;
use shopfront_core::{Product, ProductDraft, ProductId};
use tracing::{debug, instrument};

use crate::error::ApiResult;
use crate::http::ApiClient;

/// Operations on the remote product collection.
///
/// Every call is a direct round trip; implementations hold no product state.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Fetch every product.
    async fn list_all(&self) -> ApiResult<Vec<Product>>;

    /// Create a product from a draft and return the stored entity.
    async fn create(&self, draft: &ProductDraft) -> ApiResult<Product>;

    /// Replace the product identified by `id`.
    async fn update(&self, id: &ProductId, product: &Product) -> ApiResult<()>;

    /// Delete the product identified by `id`.
    async fn delete(&self, id: &ProductId) -> ApiResult<()>;
}

/// [`CatalogStore`] backed by the REST API.
#[derive(Debug, Clone)]
pub struct HttpCatalogStore {
    api: ApiClient,
}

impl HttpCatalogStore {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CatalogStore for HttpCatalogStore {
    #[instrument(skip(self))]
    async fn list_all(&self) -> ApiResult<Vec<Product>> {
        let products: Vec<Product> = self.api.get(&["products"]).await?;
        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    async fn create(&self, draft: &ProductDraft) -> ApiResult<Product> {
        let product: Product = self.api.post(&["products"], draft).await?;
        debug!(id = %product.id, "Created product");
        Ok(product)
    }

    #[instrument(skip(self, product), fields(id = %id))]
    async fn update(&self, id: &ProductId, product: &Product) -> ApiResult<()> {
        self.api.put(&["products", id.as_str()], product).await
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: &ProductId) -> ApiResult<()> {
        self.api.delete(&["products", id.as_str()]).await
    }
}
