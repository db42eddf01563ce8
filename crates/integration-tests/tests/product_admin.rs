//! Integration tests for catalog administration.
//!
//! Each test drives `ProductAdmin` over `HttpCatalogStore` against a fresh
//! in-process backend.

use std::sync::Arc;

use shopfront_admin::{AdminError, ProductAdmin, delete_prompt};
use shopfront_client::{ApiError, CatalogStore, HttpCatalogStore};
use shopfront_core::{Buyer, NoticeKind, OrderStatus, Price, ProductId, RecordingNotifier, UserId};
use shopfront_integration_tests::TestBackend;

async fn setup(notifier: RecordingNotifier) -> (TestBackend, ProductAdmin, Arc<RecordingNotifier>) {
    let backend = TestBackend::start().await.expect("Failed to start backend");
    let api = backend.api_client().expect("Failed to build client");
    let notifier = Arc::new(notifier);
    let admin = ProductAdmin::new(Arc::new(HttpCatalogStore::new(api)), notifier.clone());
    (backend, admin, notifier)
}

fn fill_draft(admin: &mut ProductAdmin, name: &str, description: &str, cents: i64) {
    admin.begin_add();
    let draft = admin.new_product_mut();
    draft.name = name.to_string();
    draft.description = description.to_string();
    draft.price = Price::from_cents(cents);
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_product_appears_once_after_refresh() {
    let (backend, mut admin, notifier) = setup(RecordingNotifier::confirming()).await;
    fill_draft(&mut admin, "Pen", "Blue pen", 150);

    let created = admin
        .submit_new_product()
        .await
        .expect("Create should succeed");

    assert!(!created.id.is_empty());
    let matching: Vec<_> = admin.products().iter().filter(|p| p.id == created.id).collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching.first().map(|p| p.name.as_str()), Some("Pen"));
    assert_eq!(created.price, Price::from_cents(150));

    let counts = backend.counts();
    assert_eq!(counts.create_product, 1);
    assert_eq!(counts.list_products, 1);

    assert!(!admin.is_adding());
    assert!(admin.new_product().name.is_empty());
    assert_eq!(notifier.messages(), vec!["Product added successfully!"]);
}

#[tokio::test]
async fn test_invalid_draft_makes_no_requests() {
    let (backend, mut admin, notifier) = setup(RecordingNotifier::confirming()).await;

    fill_draft(&mut admin, "Pen", "Blue pen", 0);
    let result = admin.submit_new_product().await;
    assert!(matches!(result, Err(AdminError::Validation(_))));

    fill_draft(&mut admin, "", "Blue pen", 150);
    assert!(admin.submit_new_product().await.is_err());

    assert_eq!(backend.counts().total(), 0);
    let notifications = notifier.notifications();
    assert_eq!(notifications.len(), 2);
    assert!(notifications.iter().all(|n| n.kind == NoticeKind::Validation));
}

#[tokio::test]
async fn test_duplicate_name_shows_backend_message() {
    let (backend, mut admin, notifier) = setup(RecordingNotifier::confirming()).await;
    backend.seed_product("Pen", "Blue pen", 150);

    fill_draft(&mut admin, "pen", "Another pen", 200);
    let result = admin.submit_new_product().await;

    assert!(matches!(
        result,
        Err(AdminError::Store(ApiError::Validation { status: 400, .. }))
    ));
    assert_eq!(notifier.messages(), vec!["Product name already exists"]);
    assert!(admin.is_adding());
    assert_eq!(admin.new_product().name, "pen");
    assert_eq!(backend.counts().list_products, 0);
}

// ============================================================================
// Edit
// ============================================================================

#[tokio::test]
async fn test_edit_product_updates_backend() {
    let (backend, mut admin, notifier) = setup(RecordingNotifier::confirming()).await;
    let pen = backend.seed_product("Pen", "Blue pen", 150);
    admin.refresh().await.expect("Refresh should succeed");

    admin.begin_edit(&pen);
    if let Some(draft) = admin.editing_mut() {
        draft.price = Price::from_cents(175);
    }
    admin.submit_edit().await.expect("Update should succeed");

    assert!(admin.editing().is_none());
    let stored = backend.state().products();
    assert_eq!(stored.first().map(|p| p.price), Some(Price::from_cents(175)));
    assert_eq!(admin.products().first().map(|p| p.price), Some(Price::from_cents(175)));
    assert_eq!(notifier.messages(), vec!["Product updated successfully!"]);
}

#[tokio::test]
async fn test_edit_does_not_touch_listing_until_saved() {
    let (backend, mut admin, _) = setup(RecordingNotifier::confirming()).await;
    let pen = backend.seed_product("Pen", "Blue pen", 150);
    admin.refresh().await.expect("Refresh should succeed");

    admin.begin_edit(&pen);
    if let Some(draft) = admin.editing_mut() {
        draft.name = "Quill".to_string();
    }
    admin.cancel_edit();

    assert_eq!(admin.products().first().map(|p| p.name.as_str()), Some("Pen"));
    assert_eq!(backend.counts().update_product, 0);
}

#[tokio::test]
async fn test_update_unknown_product_is_not_found() {
    let backend = TestBackend::start().await.expect("Failed to start backend");
    let store = HttpCatalogStore::new(backend.api_client().expect("Failed to build client"));
    let mut ghost = backend.seed_product("Pen", "Blue pen", 150);
    ghost.id = ProductId::new("000000000000000000000000");

    let result = store.update(&ghost.id, &ghost).await;

    assert!(matches!(
        result,
        Err(ApiError::NotFound { message: Some(ref m) }) if m == "Product not found"
    ));
}

#[tokio::test]
async fn test_rename_onto_existing_name_is_rejected() {
    let backend = TestBackend::start().await.expect("Failed to start backend");
    let store = HttpCatalogStore::new(backend.api_client().expect("Failed to build client"));
    backend.seed_product("Pen", "Blue pen", 150);
    let mut pencil = backend.seed_product("Pencil", "HB pencil", 80);
    pencil.name = "Pen".to_string();

    let result = store.update(&pencil.id, &pencil).await;

    assert!(matches!(
        result,
        Err(ApiError::Validation { status: 400, message: Some(ref m) }) if m == "Product name already exists"
    ));
}

#[tokio::test]
async fn test_reserved_characters_in_product_id_stay_in_one_segment() {
    let backend = TestBackend::start().await.expect("Failed to start backend");
    let store = HttpCatalogStore::new(backend.api_client().expect("Failed to build client"));
    let mut pen = backend.seed_product("Pen", "Blue pen", 150);

    for raw in ["a#b", "a b/c", "a?c"] {
        pen.id = ProductId::new(raw);
        let result = store.update(&pen.id, &pen).await;
        assert!(matches!(
            result,
            Err(ApiError::NotFound { message: Some(ref m) }) if m == "Product not found"
        ));
    }
    assert_eq!(backend.counts().update_product, 3);
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_confirmed() {
    let (backend, mut admin, notifier) = setup(RecordingNotifier::confirming()).await;
    let pen = backend.seed_product("Pen", "Blue pen", 150);
    backend.seed_product("Pencil", "HB pencil", 80);
    admin.refresh().await.expect("Refresh should succeed");

    let deleted = admin.request_delete(&pen.id).await.expect("Delete should succeed");

    assert!(deleted);
    assert_eq!(admin.products().len(), 1);
    assert!(admin.products().iter().all(|p| p.id != pen.id));
    assert_eq!(notifier.prompts(), vec![delete_prompt("Pen")]);
    assert_eq!(notifier.messages(), vec!["Product deleted successfully!"]);
}

#[tokio::test]
async fn test_delete_declined_sends_nothing() {
    let (backend, mut admin, notifier) = setup(RecordingNotifier::declining()).await;
    let pen = backend.seed_product("Pen", "Blue pen", 150);
    admin.refresh().await.expect("Refresh should succeed");

    let deleted = admin.request_delete(&pen.id).await.expect("Declining is not an error");

    assert!(!deleted);
    assert_eq!(backend.counts().delete_product, 0);
    assert_eq!(backend.state().products().len(), 1);
    assert!(notifier.notifications().is_empty());
}

#[tokio::test]
async fn test_delete_referenced_product_reports_backend_message_verbatim() {
    let (backend, mut admin, notifier) = setup(RecordingNotifier::confirming()).await;
    let pen = backend.seed_product("Pen", "Blue pen", 150);
    backend.seed_order(
        "o1",
        Buyer::Id(UserId::new("u1")),
        &[(&pen.id, 2)],
        OrderStatus::Pending,
    );
    admin.refresh().await.expect("Refresh should succeed");
    let before = admin.products().to_vec();

    let result = admin.request_delete(&pen.id).await;

    assert!(matches!(
        result,
        Err(AdminError::Store(ApiError::Validation { status: 409, .. }))
    ));
    assert_eq!(
        notifier.messages(),
        vec!["Product is referenced by an open order"]
    );
    assert_eq!(admin.products(), before.as_slice());
    assert_eq!(backend.counts().list_products, 1);
}

#[tokio::test]
async fn test_delete_allowed_once_order_is_delivered() {
    let (backend, mut admin, _) = setup(RecordingNotifier::confirming()).await;
    let pen = backend.seed_product("Pen", "Blue pen", 150);
    backend.seed_order(
        "o1",
        Buyer::Id(UserId::new("u1")),
        &[(&pen.id, 1)],
        OrderStatus::Delivered,
    );
    admin.refresh().await.expect("Refresh should succeed");

    assert!(admin.request_delete(&pen.id).await.expect("Delete should succeed"));
    assert!(backend.state().products().is_empty());
}

// ============================================================================
// Transport failures
// ============================================================================

#[tokio::test]
async fn test_refresh_against_unreachable_backend() {
    // Reserve a port, then release it so nothing is listening there.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .expect("Failed to reserve port");
    let config = shopfront_client::ClientConfig::new(&format!("http://{addr}"))
        .expect("Valid base URL");
    let api = shopfront_client::ApiClient::new(&config).expect("Failed to build client");
    let notifier = Arc::new(RecordingNotifier::confirming());
    let mut admin = ProductAdmin::new(Arc::new(HttpCatalogStore::new(api)), notifier.clone());

    let result = admin.refresh().await;

    assert!(matches!(result, Err(AdminError::Store(ApiError::Transport(_)))));
    assert!(!admin.is_loading());
    assert_eq!(
        notifier.messages(),
        vec!["Failed to load products. Please try again."]
    );
}
