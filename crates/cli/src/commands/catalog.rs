//! Shopper catalog listing.

#![allow(clippy::print_stdout)]

use shopfront_storefront::CatalogBrowser;

use super::{CommandError, Context};

/// Print the catalog as a shopper sees it.
///
/// # Errors
///
/// Returns `CommandError::Store` if the listing could not be fetched.
pub async fn list(ctx: &Context) -> Result<(), CommandError> {
    let mut browser = CatalogBrowser::new(ctx.catalog_store(), ctx.notifier());
    browser.refresh().await?;

    for product in browser.products() {
        println!("{}  {}", product.name, product.price);
        if !product.description.is_empty() {
            println!("    {}", product.description);
        }
        println!("    id: {}", product.id);
    }
    Ok(())
}
