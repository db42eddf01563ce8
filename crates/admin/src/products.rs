//! Product administration view-model.
//!
//! Owns the transient state of the products screen (the listing, the loading
//! flag, the new-product form, the edit draft and the selected image) and
//! turns user actions into catalog store calls. After every successful
//! mutation the whole listing is fetched again; it is never patched in place.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use shopfront_client::CatalogStore;
use shopfront_core::{LoadingFlag, Notification, Notifier, Product, ProductDraft, ProductId};
use tracing::{error, info, instrument};

use crate::error::{AdminError, AdminResult};
use crate::image;

const LOAD_FAILED: &str = "Failed to load products. Please try again.";
const INVALID_FORM: &str = "Please fill in all required fields with valid values";
const ADDED: &str = "Product added successfully!";
const ADD_FAILED: &str = "Failed to add product. Please try again.";
const NO_SELECTION: &str = "No product selected for editing";
const UPDATED: &str = "Product updated successfully!";
const UPDATE_FAILED: &str = "Failed to update product. Please try again.";
const DELETED: &str = "Product deleted successfully!";
const DELETE_FAILED: &str = "Failed to delete product.";
const IMAGE_FAILED: &str = "Failed to read the selected image.";
const UNKNOWN_PRODUCT_NAME: &str = "this product";

/// Confirmation text shown before deleting `name`.
#[must_use]
pub fn delete_prompt(name: &str) -> String {
    format!("Are you sure you want to delete \"{name}\"?\n\nThis action cannot be undone.")
}

/// State and actions of the products admin screen.
pub struct ProductAdmin {
    store: Arc<dyn CatalogStore>,
    notifier: Arc<dyn Notifier>,
    products: Vec<Product>,
    loading: LoadingFlag,
    new_product: ProductDraft,
    is_adding: bool,
    editing: Option<Product>,
    selected_file: Option<PathBuf>,
}

impl std::fmt::Debug for ProductAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductAdmin")
            .field("products", &self.products.len())
            .field("is_loading", &self.loading.is_loading())
            .field("is_adding", &self.is_adding)
            .field("editing", &self.editing.as_ref().map(|p| &p.id))
            .field("selected_file", &self.selected_file)
            .finish_non_exhaustive()
    }
}

impl ProductAdmin {
    #[must_use]
    pub fn new(store: Arc<dyn CatalogStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            notifier,
            products: Vec::new(),
            loading: LoadingFlag::new(),
            new_product: ProductDraft::default(),
            is_adding: false,
            editing: None,
            selected_file: None,
        }
    }

    // =========================================================================
    // State
    // =========================================================================

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

    /// The new-product form.
    #[must_use]
    pub const fn new_product(&self) -> &ProductDraft {
        &self.new_product
    }

    /// Mutable access to the new-product form, for field binding.
    pub const fn new_product_mut(&mut self) -> &mut ProductDraft {
        &mut self.new_product
    }

    #[must_use]
    pub const fn is_adding(&self) -> bool {
        self.is_adding
    }

    /// The edit draft, if a product is being edited.
    #[must_use]
    pub const fn editing(&self) -> Option<&Product> {
        self.editing.as_ref()
    }

    /// Mutable access to the edit draft, for field binding.
    pub const fn editing_mut(&mut self) -> Option<&mut Product> {
        self.editing.as_mut()
    }

    #[must_use]
    pub fn selected_file(&self) -> Option<&Path> {
        self.selected_file.as_deref()
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Replace the listing with a fresh snapshot from the backend.
    ///
    /// The loading flag is cleared whatever the outcome. On failure the
    /// previous listing is kept and the user is notified.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Store` if the fetch failed.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self) -> AdminResult<()> {
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
                Err(e.into())
            }
        }
    }

    /// Enter new-product authoring mode, dropping any edit in progress.
    pub fn begin_add(&mut self) {
        self.editing = None;
        self.is_adding = true;
    }

    /// Create a product from the new-product form.
    ///
    /// The form is checked locally first (non-empty name and description,
    /// price above zero); an invalid form never reaches the backend.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` for an invalid form and
    /// `AdminError::Store` if the backend rejected the create.
    #[instrument(skip(self), fields(name = %self.new_product.name))]
    pub async fn submit_new_product(&mut self) -> AdminResult<Product> {
        if !self.new_product.is_submittable() {
            self.notifier.notify(Notification::validation(INVALID_FORM));
            return Err(AdminError::Validation(INVALID_FORM.to_string()));
        }

        let result = self.store.create(&self.new_product).await;
        match result {
            Ok(product) => {
                info!(id = %product.id, "Product created");
                // A failed reload has already notified the user.
                let _ = self.refresh().await;
                self.reset_form();
                self.is_adding = false;
                self.notifier.notify(Notification::success(ADDED));
                Ok(product)
            }
            Err(e) => Err(self.report(e.into(), "Error adding product", ADD_FAILED)),
        }
    }

    /// Start editing an independent copy of `product`.
    pub fn begin_edit(&mut self, product: &Product) {
        self.editing = Some(product.clone());
        self.is_adding = false;
    }

    /// Save the edit draft.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::NoSelection` when nothing is being edited and
    /// `AdminError::Store` if the backend rejected the update.
    #[instrument(skip(self))]
    pub async fn submit_edit(&mut self) -> AdminResult<()> {
        let Some(product) = self.editing.as_ref().filter(|p| !p.id.is_empty()) else {
            self.notifier.notify(Notification::validation(NO_SELECTION));
            return Err(AdminError::NoSelection);
        };

        let result = self.store.update(&product.id, product).await;
        match result {
            Ok(()) => {
                info!("Product updated");
                let _ = self.refresh().await;
                self.editing = None;
                self.notifier.notify(Notification::success(UPDATED));
                Ok(())
            }
            Err(e) => Err(self.report(e.into(), "Error updating product", UPDATE_FAILED)),
        }
    }

    /// Abandon the edit draft and reset the new-product form.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.reset_form();
    }

    /// Delete a product after the user confirms.
    ///
    /// Returns `Ok(false)` when the user declines; nothing is sent in that
    /// case. On failure the listing is left as it was.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Store` if the backend rejected the delete.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn request_delete(&mut self, id: &ProductId) -> AdminResult<bool> {
        let name = self
            .products
            .iter()
            .find(|p| &p.id == id)
            .map_or(UNKNOWN_PRODUCT_NAME, |p| p.name.as_str());

        if !self.notifier.confirm(&delete_prompt(name)) {
            info!("Delete declined");
            return Ok(false);
        }

        let result = self.store.delete(id).await;
        match result {
            Ok(()) => {
                info!("Product deleted");
                let _ = self.refresh().await;
                self.notifier.notify(Notification::success(DELETED));
                Ok(true)
            }
            Err(e) => Err(self.report(e.into(), "Error deleting product", DELETE_FAILED)),
        }
    }

    /// Attach a local image file to whichever draft is active.
    ///
    /// The file is read and encoded as a `data:` URI without any network
    /// call. It goes into the edit draft while editing, otherwise into the
    /// new-product form.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Image` if the file cannot be read.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub async fn attach_image(&mut self, path: impl AsRef<Path>) -> AdminResult<()> {
        let path = path.as_ref();
        let uri = match image::read_as_data_uri(path).await {
            Ok(uri) => uri,
            Err(e) => return Err(self.report(e.into(), "Error reading image", IMAGE_FAILED)),
        };

        self.selected_file = Some(path.to_path_buf());
        match self.editing.as_mut() {
            Some(product) => product.image = Some(uri),
            None => self.new_product.image = Some(uri),
        }
        Ok(())
    }

    fn reset_form(&mut self) {
        self.new_product = ProductDraft::default();
        self.selected_file = None;
    }

    /// Log `err`, notify the user once and hand the error back.
    fn report(&self, err: AdminError, context: &str, fallback: &str) -> AdminError {
        error!(error = %err, "{context}");
        self.notifier
            .notify(Notification::error(err.user_message(fallback)));
        err
    }
}
