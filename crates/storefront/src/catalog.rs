//! Catalog browsing for shoppers.

use std::sync::Arc;

use shopfront_client::{ApiResult, CatalogStore};
use shopfront_core::{LoadingFlag, Notification, Notifier, Product, ProductId};
use tracing::{error, instrument};

use crate::session::ShopSession;

const LOAD_FAILED: &str = "Failed to load products. Please try again.";
const ADDED_TO_CART: &str = "Product added to cart!";
const NOT_IN_CATALOG: &str = "This product is no longer available.";

/// Read-only product listing with add-to-cart.
pub struct CatalogBrowser {
    store: Arc<dyn CatalogStore>,
    notifier: Arc<dyn Notifier>,
    products: Vec<Product>,
    loading: LoadingFlag,
}

impl std::fmt::Debug for CatalogBrowser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogBrowser")
            .field("products", &self.products.len())
            .field("is_loading", &self.loading.is_loading())
            .finish_non_exhaustive()
    }
}

impl CatalogBrowser {
    #[must_use]
    pub fn new(store: Arc<dyn CatalogStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            notifier,
            products: Vec::new(),
            loading: LoadingFlag::new(),
        }
    }

    /// Products from the last successful fetch.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    /// Handle observing the loading flag, for renderers on other tasks.
    #[must_use]
    pub fn loading_flag(&self) -> LoadingFlag {
        self.loading.clone()
    }

    /// Replace the listing with a fresh snapshot from the backend.
    ///
    /// # Errors
    ///
    /// Returns the store error if the fetch failed; the user has been
    /// notified and the previous listing is kept.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self) -> ApiResult<()> {
        let result = {
            let _loading = self.loading.start();
            self.store.list_all().await
        };

        match result {
            Ok(products) => {
                self.products = products;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Error loading products");
                self.notifier.notify(Notification::error(LOAD_FAILED));
                Err(e)
            }
        }
    }

    /// Add a listed product to the session's cart.
    ///
    /// Returns `false` and leaves the cart untouched if the product is not in
    /// the current listing.
    pub fn add_to_cart(&self, product_id: &ProductId, session: &mut ShopSession) -> bool {
        let Some(product) = self.products.iter().find(|p| &p.id == product_id) else {
            self.notifier.notify(Notification::validation(NOT_IN_CATALOG));
            return false;
        };

        session.cart_mut().add(product.clone());
        tracing::debug!(
            session_id = %session.id(),
            product_id = %product_id,
            cart_items = session.cart().len(),
            "Added product to cart"
        );
        self.notifier.notify(Notification::success(ADDED_TO_CART));
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use shopfront_client::{ApiError, ApiResult};
    use shopfront_core::{NoticeKind, Price, ProductDraft, RecordingNotifier};

    use super::*;

    struct FixedCatalog {
        fail: AtomicBool,
        observed: Mutex<Option<LoadingFlag>>,
        loading_seen: Mutex<Vec<bool>>,
    }

    fn pen() -> Product {
        Product {
            id: ProductId::new("p1"),
            name: "Pen".to_string(),
            description: "Blue pen".to_string(),
            price: Price::from_cents(150),
            image: None,
        }
    }

    #[async_trait]
    impl CatalogStore for FixedCatalog {
        async fn list_all(&self) -> ApiResult<Vec<Product>> {
            if let Some(flag) = self.observed.lock().unwrap().as_ref() {
                self.loading_seen.lock().unwrap().push(flag.is_loading());
            }
            if self.fail.load(Ordering::SeqCst) {
                return Err(ApiError::Transport("connection refused".to_string()));
            }
            Ok(vec![pen()])
        }

        async fn create(&self, _draft: &ProductDraft) -> ApiResult<Product> {
            unreachable!("storefront never creates products")
        }

        async fn update(&self, _id: &ProductId, _product: &Product) -> ApiResult<()> {
            unreachable!("storefront never updates products")
        }

        async fn delete(&self, _id: &ProductId) -> ApiResult<()> {
            unreachable!("storefront never deletes products")
        }
    }

    fn browser(fail: bool) -> (CatalogBrowser, Arc<RecordingNotifier>, Arc<FixedCatalog>) {
        let store = Arc::new(FixedCatalog {
            fail: AtomicBool::new(fail),
            observed: Mutex::new(None),
            loading_seen: Mutex::new(Vec::new()),
        });
        let notifier = Arc::new(RecordingNotifier::confirming());
        (
            CatalogBrowser::new(store.clone(), notifier.clone()),
            notifier,
            store,
        )
    }

    #[tokio::test]
    async fn test_refresh_loads_products() {
        let (mut browser, notifier, _) = browser(false);
        browser.refresh().await.unwrap();
        assert_eq!(browser.products(), &[pen()]);
        assert!(!browser.is_loading());
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_listing_and_notifies() {
        let (mut browser, notifier, store) = browser(false);
        browser.refresh().await.unwrap();

        store.fail.store(true, Ordering::SeqCst);
        let err = browser.refresh().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert_eq!(browser.products().len(), 1);
        assert!(!browser.is_loading());
        assert_eq!(notifier.messages(), vec![LOAD_FAILED]);
    }

    #[tokio::test]
    async fn test_loading_flag_raised_during_fetch() {
        for fail in [false, true] {
            let (mut browser, _, store) = browser(fail);
            *store.observed.lock().unwrap() = Some(browser.loading_flag());

            let result = browser.refresh().await;
            assert_eq!(result.is_err(), fail);
            assert_eq!(*store.loading_seen.lock().unwrap(), vec![true]);
            assert!(!browser.is_loading());
        }
    }

    #[tokio::test]
    async fn test_add_to_cart() {
        let (mut browser, notifier, _) = browser(false);
        browser.refresh().await.unwrap();
        let mut session = ShopSession::start();

        assert!(browser.add_to_cart(&ProductId::new("p1"), &mut session));
        assert!(browser.add_to_cart(&ProductId::new("p1"), &mut session));
        assert_eq!(session.cart().len(), 2);
        assert_eq!(notifier.notifications()[0].kind, NoticeKind::Success);
    }

    #[tokio::test]
    async fn test_add_unknown_product() {
        let (mut browser, notifier, _) = browser(false);
        browser.refresh().await.unwrap();
        let mut session = ShopSession::start();

        assert!(!browser.add_to_cart(&ProductId::new("missing"), &mut session));
        assert!(session.cart().is_empty());
        assert_eq!(notifier.notifications()[0].kind, NoticeKind::Validation);
    }
}
