//! Cart preview.

#![allow(clippy::print_stdout)]

use shopfront_core::ProductId;
use shopfront_storefront::{CatalogBrowser, ShopSession};

use super::{CommandError, Context};

/// Add the given products to a fresh cart and print its contents.
///
/// Unknown ids are reported and skipped.
///
/// # Errors
///
/// Returns `CommandError::Store` if the catalog could not be fetched.
pub async fn preview(ctx: &Context, ids: &[ProductId]) -> Result<(), CommandError> {
    let mut browser = CatalogBrowser::new(ctx.catalog_store(), ctx.notifier());
    browser.refresh().await?;

    let mut session = ShopSession::start();
    for id in ids {
        browser.add_to_cart(id, &mut session);
    }

    let cart = session.cart();
    if cart.is_empty() {
        println!("Cart is empty.");
        return Ok(());
    }
    for (n, product) in cart.items().iter().enumerate() {
        println!("{:>3}. {:<28} {:>10}", n + 1, product.name, product.price.to_string());
    }
    println!("     {:<28} {:>10}", "Subtotal", cart.subtotal().to_string());
    Ok(())
}
