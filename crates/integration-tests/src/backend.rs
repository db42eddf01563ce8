//! In-memory REST backend.
//!
//! Serves the product and order endpoints with the same business rules the
//! real backend enforces:
//!
//! - product names are unique (case-insensitive); duplicates get 400
//! - a product referenced by an order that is not delivered or cancelled
//!   cannot be deleted; the attempt gets 409
//! - delivered and cancelled orders are terminal; status changes get 400
//! - unknown identifiers get 404
//!
//! Every rejection carries an `{"error": "..."}` body.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, put},
};
use serde::{Deserialize, Serialize};
use shopfront_core::{Order, OrderStatus, Product, ProductDraft, ProductId};

/// Rejection returned by a handler.
#[derive(Debug, Serialize)]
pub struct BackendError {
    #[serde(skip)]
    status: StatusCode,
    error: String,
}

impl BackendError {
    fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            error: msg.into(),
        }
    }

    fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, msg)
    }

    fn not_found(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, msg)
    }
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        tracing::debug!(status = %self.status, error = %self.error, "Request rejected");
        (self.status, Json(self)).into_response()
    }
}

/// Number of requests received per endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestCounts {
    pub list_products: usize,
    pub create_product: usize,
    pub update_product: usize,
    pub delete_product: usize,
    pub list_orders: usize,
    pub set_order_status: usize,
}

impl RequestCounts {
    /// Requests that changed or tried to change data.
    #[must_use]
    pub const fn mutations(&self) -> usize {
        self.create_product + self.update_product + self.delete_product + self.set_order_status
    }

    /// All requests.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.mutations() + self.list_products + self.list_orders
    }
}

#[derive(Debug, Default)]
struct Data {
    products: Vec<Product>,
    orders: Vec<Order>,
    counts: RequestCounts,
}

impl Data {
    fn insert_product(&mut self, draft: ProductDraft) -> Product {
        let product = Product {
            id: ProductId::new(new_id()),
            name: draft.name,
            description: draft.description,
            price: draft.price,
            image: draft.image,
        };
        self.products.push(product.clone());
        product
    }
}

/// Shared backend state. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct BackendState {
    inner: Arc<Mutex<Data>>,
}

impl BackendState {
    fn data(&self) -> MutexGuard<'_, Data> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a product directly, bypassing the HTTP rules.
    pub fn insert_product(&self, draft: ProductDraft) -> Product {
        self.data().insert_product(draft)
    }

    /// Insert an order directly.
    pub fn insert_order(&self, order: Order) {
        self.data().orders.push(order);
    }

    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.data().products.clone()
    }

    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        self.data().orders.clone()
    }

    #[must_use]
    pub fn counts(&self) -> RequestCounts {
        self.data().counts
    }
}

/// Fresh 24-character hexadecimal identifier.
#[must_use]
pub fn new_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(24);
    id
}

const fn is_terminal(status: &OrderStatus) -> bool {
    matches!(status, OrderStatus::Delivered | OrderStatus::Cancelled)
}

fn name_taken(products: &[Product], name: &str, except: Option<&ProductId>) -> bool {
    products
        .iter()
        .filter(|p| Some(&p.id) != except)
        .any(|p| p.name.eq_ignore_ascii_case(name.trim()))
}

fn check_fields(name: &str, price_positive: bool) -> Result<(), BackendError> {
    if name.trim().is_empty() {
        return Err(BackendError::bad_request("Product name is required"));
    }
    if !price_positive {
        return Err(BackendError::bad_request("Price must be greater than zero"));
    }
    Ok(())
}

async fn list_products(State(state): State<BackendState>) -> Json<Vec<Product>> {
    let mut data = state.data();
    data.counts.list_products += 1;
    Json(data.products.clone())
}

async fn create_product(
    State(state): State<BackendState>,
    Json(draft): Json<ProductDraft>,
) -> Result<(StatusCode, Json<Product>), BackendError> {
    let mut data = state.data();
    data.counts.create_product += 1;
    check_fields(&draft.name, draft.price.is_positive())?;
    if name_taken(&data.products, &draft.name, None) {
        return Err(BackendError::bad_request("Product name already exists"));
    }

    let product = data.insert_product(draft);
    tracing::debug!(id = %product.id, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

async fn update_product(
    State(state): State<BackendState>,
    Path(id): Path<String>,
    Json(changes): Json<ProductDraft>,
) -> Result<Json<Product>, BackendError> {
    let id = ProductId::new(id);
    let mut data = state.data();
    data.counts.update_product += 1;

    let index = data
        .products
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| BackendError::not_found("Product not found"))?;

    check_fields(&changes.name, changes.price.is_positive())?;
    if name_taken(&data.products, &changes.name, Some(&id)) {
        return Err(BackendError::bad_request("Product name already exists"));
    }

    let product = data
        .products
        .get_mut(index)
        .ok_or_else(|| BackendError::not_found("Product not found"))?;
    product.name = changes.name;
    product.description = changes.description;
    product.price = changes.price;
    product.image = changes.image;
    Ok(Json(product.clone()))
}

#[derive(Debug, Serialize)]
struct Message {
    message: &'static str,
}

async fn delete_product(
    State(state): State<BackendState>,
    Path(id): Path<String>,
) -> Result<Json<Message>, BackendError> {
    let id = ProductId::new(id);
    let mut data = state.data();
    data.counts.delete_product += 1;

    let index = data
        .products
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| BackendError::not_found("Product not found"))?;

    let referenced = data
        .orders
        .iter()
        .filter(|o| !is_terminal(&o.status))
        .flat_map(|o| &o.items)
        .any(|item| item.product.id() == Some(&id));
    if referenced {
        return Err(BackendError::new(
            StatusCode::CONFLICT,
            "Product is referenced by an open order",
        ));
    }

    data.products.remove(index);
    Ok(Json(Message {
        message: "Product deleted",
    }))
}

async fn list_orders(State(state): State<BackendState>) -> Json<Vec<Order>> {
    let mut data = state.data();
    data.counts.list_orders += 1;
    Json(data.orders.clone())
}

#[derive(Debug, Deserialize)]
struct StatusBody {
    status: String,
}

async fn set_order_status(
    State(state): State<BackendState>,
    Path(id): Path<String>,
    Json(body): Json<StatusBody>,
) -> Result<Json<Order>, BackendError> {
    let mut data = state.data();
    data.counts.set_order_status += 1;

    let status: OrderStatus = body.status.parse().map_err(BackendError::bad_request)?;
    let order = data
        .orders
        .iter_mut()
        .find(|o| o.id.as_str() == id)
        .ok_or_else(|| BackendError::not_found("Order not found"))?;

    if is_terminal(&order.status) {
        return Err(BackendError::bad_request(format!(
            "Cannot change status of a {} order",
            order.status
        )));
    }

    order.status = status;
    Ok(Json(order.clone()))
}

/// Router serving the REST surface over `state`.
pub fn router(state: BackendState) -> Router {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/{id}", put(update_product).delete(delete_product))
        .route("/orders", get(list_orders))
        .route("/orders/{id}/status", patch(set_order_status))
        .with_state(state)
}
