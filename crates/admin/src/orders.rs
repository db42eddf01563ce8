//! Order administration view-model.
//!
//! Lists orders, requests status changes and derives the read-only figures
//! shown on the orders screen. Status changes are never applied locally: the
//! displayed status only moves after the backend confirms and the listing is
//! fetched again.

use std::sync::Arc;

use shopfront_client::OrderStore;
use shopfront_core::{LoadingFlag, Notification, Notifier, Order, OrderId, OrderStatus};
use tracing::{error, info, instrument};

use crate::error::{AdminError, AdminResult};

const LOAD_FAILED: &str = "Failed to load orders. Please try again.";
const STATUS_UPDATED: &str = "Order status updated successfully!";
const STATUS_FAILED: &str = "Failed to update order status. Please try again.";

/// Presentation group for an order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusBadge {
    Warning,
    Info,
    Primary,
    Success,
    Danger,
    /// Neutral badge for statuses outside the known set.
    Secondary,
}

impl StatusBadge {
    #[must_use]
    pub const fn for_status(status: &OrderStatus) -> Self {
        match status {
            OrderStatus::Pending => Self::Warning,
            OrderStatus::Processing => Self::Info,
            OrderStatus::Shipped => Self::Primary,
            OrderStatus::Delivered => Self::Success,
            OrderStatus::Cancelled => Self::Danger,
            OrderStatus::Unrecognized(_) => Self::Secondary,
        }
    }

    /// CSS class for the badge.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Warning => "bg-warning",
            Self::Info => "bg-info",
            Self::Primary => "bg-primary",
            Self::Success => "bg-success",
            Self::Danger => "bg-danger",
            Self::Secondary => "bg-secondary",
        }
    }
}

/// Number of orders in each status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCounts {
    pub pending: usize,
    pub processing: usize,
    pub shipped: usize,
    pub delivered: usize,
    pub cancelled: usize,
    /// Orders whose status is outside the known set. Not part of any of
    /// the five counts above.
    pub unrecognized: usize,
}

impl StatusCounts {
    /// Tally a list of orders.
    #[must_use]
    pub fn tally(orders: &[Order]) -> Self {
        orders.iter().fold(Self::default(), |mut counts, order| {
            match order.status {
                OrderStatus::Pending => counts.pending += 1,
                OrderStatus::Processing => counts.processing += 1,
                OrderStatus::Shipped => counts.shipped += 1,
                OrderStatus::Delivered => counts.delivered += 1,
                OrderStatus::Cancelled => counts.cancelled += 1,
                OrderStatus::Unrecognized(_) => counts.unrecognized += 1,
            }
            counts
        })
    }

    /// Count for one status. Unrecognized values always count zero.
    #[must_use]
    pub const fn get(&self, status: &OrderStatus) -> usize {
        match status {
            OrderStatus::Pending => self.pending,
            OrderStatus::Processing => self.processing,
            OrderStatus::Shipped => self.shipped,
            OrderStatus::Delivered => self.delivered,
            OrderStatus::Cancelled => self.cancelled,
            OrderStatus::Unrecognized(_) => 0,
        }
    }

    /// Sum of the five known-status counts.
    #[must_use]
    pub const fn known_total(&self) -> usize {
        self.pending + self.processing + self.shipped + self.delivered + self.cancelled
    }
}

/// State and actions of the orders admin screen.
pub struct OrderAdmin {
    store: Arc<dyn OrderStore>,
    notifier: Arc<dyn Notifier>,
    orders: Vec<Order>,
    loading: LoadingFlag,
}

impl std::fmt::Debug for OrderAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderAdmin")
            .field("orders", &self.orders.len())
            .field("is_loading", &self.loading.is_loading())
            .finish_non_exhaustive()
    }
}

impl OrderAdmin {
    #[must_use]
    pub fn new(store: Arc<dyn OrderStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            notifier,
            orders: Vec::new(),
            loading: LoadingFlag::new(),
        }
    }

    /// Orders from the last successful fetch.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
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
    /// Returns `AdminError::Store` if the fetch failed; the user has been
    /// notified and the previous listing is kept.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self) -> AdminResult<()> {
        let result = {
            let _loading = self.loading.start();
            self.store.list_all().await
        };

        match result {
            Ok(orders) => {
                self.orders = orders;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Error loading orders");
                self.notifier.notify(Notification::error(LOAD_FAILED));
                Err(e.into())
            }
        }
    }

    /// Ask the backend to move an order to `status`, then reload.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Store` if the backend rejected the change.
    #[instrument(skip(self), fields(id = %id, status = %status))]
    pub async fn change_status(&mut self, id: &OrderId, status: OrderStatus) -> AdminResult<()> {
        let result = self.store.set_status(id, &status).await;
        match result {
            Ok(()) => {
                info!("Order status updated");
                // A failed reload has already notified the user.
                let _ = self.refresh().await;
                self.notifier.notify(Notification::success(STATUS_UPDATED));
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Error updating order status");
                let err = AdminError::from(e);
                self.notifier
                    .notify(Notification::error(err.user_message(STATUS_FAILED)));
                Err(err)
            }
        }
    }

    /// Per-status counts over the current listing.
    #[must_use]
    pub fn status_counts(&self) -> StatusCounts {
        StatusCounts::tally(&self.orders)
    }

    /// Total units in an order.
    #[must_use]
    pub fn total_items(order: &Order) -> u64 {
        order.total_items()
    }

    /// Badge for an order's status.
    #[must_use]
    pub const fn badge(order: &Order) -> StatusBadge {
        StatusBadge::for_status(&order.status)
    }

    /// Buyer column text, rendered differently for embedded records and bare
    /// identifiers.
    #[must_use]
    pub fn buyer_label(order: &Order) -> String {
        order.buyer.label()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use shopfront_client::{ApiError, ApiResult};
    use shopfront_core::{Buyer, OrderItem, ProductId, ProductRef, RecordingNotifier, User, UserId};

    use super::*;

    #[derive(Default)]
    struct FakeOrders {
        orders: Mutex<Vec<Order>>,
        list_calls: AtomicUsize,
        fail_list: Mutex<Option<ApiError>>,
        fail_set_status: Mutex<Option<ApiError>>,
        observed: Mutex<Option<LoadingFlag>>,
        loading_seen: Mutex<Vec<bool>>,
    }

    #[async_trait]
    impl OrderStore for FakeOrders {
        async fn list_all(&self) -> ApiResult<Vec<Order>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(flag) = self.observed.lock().unwrap().as_ref() {
                self.loading_seen.lock().unwrap().push(flag.is_loading());
            }
            if let Some(e) = self.fail_list.lock().unwrap().take() {
                return Err(e);
            }
            Ok(self.orders.lock().unwrap().clone())
        }

        async fn set_status(&self, id: &OrderId, status: &OrderStatus) -> ApiResult<()> {
            if let Some(e) = self.fail_set_status.lock().unwrap().take() {
                return Err(e);
            }
            let mut orders = self.orders.lock().unwrap();
            let order = orders
                .iter_mut()
                .find(|o| &o.id == id)
                .ok_or(ApiError::NotFound { message: None })?;
            order.status = status.clone();
            Ok(())
        }
    }

    fn order(id: &str, status: OrderStatus, quantities: &[u32]) -> Order {
        Order {
            id: OrderId::new(id),
            buyer: Buyer::Id(UserId::new("u1")),
            items: quantities
                .iter()
                .map(|&quantity| OrderItem {
                    product: ProductRef::Id(ProductId::new("p1")),
                    quantity,
                })
                .collect(),
            status,
            total_amount: None,
            created_at: None,
        }
    }

    fn admin_with(orders: Vec<Order>) -> (OrderAdmin, Arc<FakeOrders>, Arc<RecordingNotifier>) {
        let store = Arc::new(FakeOrders {
            orders: Mutex::new(orders),
            ..FakeOrders::default()
        });
        let notifier = Arc::new(RecordingNotifier::confirming());
        (
            OrderAdmin::new(store.clone(), notifier.clone()),
            store,
            notifier,
        )
    }

    #[test]
    fn test_status_counts_sum_to_length() {
        let orders: Vec<_> = OrderStatus::ALL
            .iter()
            .cycle()
            .take(12)
            .enumerate()
            .map(|(i, status)| order(&format!("o{i}"), status.clone(), &[1]))
            .collect();

        let counts = StatusCounts::tally(&orders);

        assert_eq!(counts.known_total(), orders.len());
        assert_eq!(counts.pending, 3);
        assert_eq!(counts.cancelled, 2);
        assert_eq!(counts.unrecognized, 0);
    }

    #[test]
    fn test_unrecognized_status_counts_nowhere() {
        let orders = vec![
            order("o1", OrderStatus::Pending, &[1]),
            order("o2", OrderStatus::Unrecognized("on_hold".to_string()), &[1]),
        ];

        let counts = StatusCounts::tally(&orders);

        assert_eq!(counts.known_total(), 1);
        assert_eq!(counts.unrecognized, 1);
        assert_eq!(
            counts.get(&OrderStatus::Unrecognized("on_hold".to_string())),
            0
        );
    }

    #[test]
    fn test_badges() {
        let classes: Vec<_> = OrderStatus::ALL
            .iter()
            .map(|s| StatusBadge::for_status(s).css_class())
            .collect();
        assert_eq!(
            classes,
            vec!["bg-warning", "bg-info", "bg-primary", "bg-success", "bg-danger"]
        );
        assert_eq!(
            StatusBadge::for_status(&OrderStatus::Unrecognized("lost".to_string())),
            StatusBadge::Secondary
        );
        assert_eq!(
            StatusBadge::for_status(&OrderStatus::default()),
            StatusBadge::Secondary
        );
    }

    #[test]
    fn test_order_without_status_counts_as_unrecognized() {
        let order: Order = serde_json::from_value(serde_json::json!({
            "_id": "o1",
            "user": null,
            "items": [{"product": null, "quantity": 2}]
        }))
        .unwrap();

        let counts = StatusCounts::tally(std::slice::from_ref(&order));

        assert_eq!(counts.unrecognized, 1);
        assert_eq!(counts.known_total(), 0);
        assert_eq!(OrderAdmin::badge(&order), StatusBadge::Secondary);
        assert_eq!(OrderAdmin::buyer_label(&order), "Unknown customer");
        assert_eq!(OrderAdmin::total_items(&order), 2);
    }

    #[test]
    fn test_total_items() {
        assert_eq!(OrderAdmin::total_items(&order("o1", OrderStatus::Pending, &[2, 3])), 5);
        assert_eq!(OrderAdmin::total_items(&order("o1", OrderStatus::Pending, &[])), 0);
    }

    #[test]
    fn test_buyer_label_discriminates() {
        let mut with_record = order("o1", OrderStatus::Pending, &[]);
        with_record.buyer = Buyer::Record(User {
            id: UserId::new("u1"),
            name: Some("Ada".to_string()),
            email: None,
        });

        assert_eq!(OrderAdmin::buyer_label(&with_record), "Ada");
        assert_eq!(
            OrderAdmin::buyer_label(&order("o2", OrderStatus::Pending, &[])),
            "User u1"
        );
    }

    #[tokio::test]
    async fn test_change_status_reloads_and_moves_counts() {
        let (mut admin, store, notifier) = admin_with(vec![
            order("o1", OrderStatus::Pending, &[2]),
            order("o2", OrderStatus::Pending, &[1]),
        ]);
        admin.refresh().await.unwrap();
        let before = admin.status_counts();

        admin
            .change_status(&OrderId::new("o1"), OrderStatus::Shipped)
            .await
            .unwrap();

        let after = admin.status_counts();
        assert_eq!(after.pending, before.pending - 1);
        assert_eq!(after.shipped, before.shipped + 1);
        assert_eq!(admin.orders()[0].status, OrderStatus::Shipped);
        assert_eq!(store.list_calls.load(Ordering::SeqCst), 2);
        assert_eq!(notifier.messages(), vec![STATUS_UPDATED]);
    }

    #[tokio::test]
    async fn test_change_status_failure_is_not_applied_locally() {
        let (mut admin, store, notifier) = admin_with(vec![order("o1", OrderStatus::Delivered, &[1])]);
        admin.refresh().await.unwrap();
        *store.fail_set_status.lock().unwrap() = Some(ApiError::Validation {
            status: 400,
            message: Some("Cannot change status of a delivered order".to_string()),
        });

        let result = admin
            .change_status(&OrderId::new("o1"), OrderStatus::Pending)
            .await;

        assert!(result.is_err());
        assert_eq!(admin.orders()[0].status, OrderStatus::Delivered);
        assert_eq!(store.list_calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            notifier.messages(),
            vec!["Cannot change status of a delivered order"]
        );
    }

    #[tokio::test]
    async fn test_change_status_failure_fallback_message() {
        let (mut admin, store, notifier) = admin_with(vec![]);
        *store.fail_set_status.lock().unwrap() = Some(ApiError::Transport("refused".to_string()));

        assert!(
            admin
                .change_status(&OrderId::new("o1"), OrderStatus::Shipped)
                .await
                .is_err()
        );
        assert_eq!(notifier.messages(), vec![STATUS_FAILED]);
    }

    #[tokio::test]
    async fn test_loading_flag_raised_only_while_listing() {
        let (mut admin, store, notifier) = admin_with(vec![order("o1", OrderStatus::Pending, &[1])]);
        *store.observed.lock().unwrap() = Some(admin.loading_flag());

        admin.refresh().await.unwrap();
        assert!(!admin.is_loading());

        *store.fail_list.lock().unwrap() = Some(ApiError::Transport("refused".to_string()));
        assert!(admin.refresh().await.is_err());
        assert!(!admin.is_loading());

        assert_eq!(*store.loading_seen.lock().unwrap(), vec![true, true]);
        assert_eq!(admin.orders().len(), 1);
        assert_eq!(notifier.messages(), vec![LOAD_FAILED]);
    }

    #[tokio::test]
    async fn test_refresh_clears_loading() {
        let (mut admin, _, _) = admin_with(vec![order("o1", OrderStatus::Pending, &[1])]);
        admin.refresh().await.unwrap();
        assert!(!admin.is_loading());
        assert_eq!(admin.orders().len(), 1);
    }
}
