//! Catalog administration commands.
//!
//! # Usage
//!
//! ```bash
//! shopfront products list
//! shopfront products create -n Pen -d "Blue pen" -p 1.50 --image pen.png
//! shopfront products update 6650c0ffee --price 1.75
//! shopfront products delete 6650c0ffee --yes
//! ```

#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use rust_decimal::Decimal;
use shopfront_admin::ProductAdmin;
use shopfront_core::{Price, Product, ProductId};

use super::{CommandError, Context};

/// Field values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct ProductFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub image: Option<PathBuf>,
}

fn admin(ctx: &Context) -> ProductAdmin {
    ProductAdmin::new(ctx.catalog_store(), ctx.notifier())
}

fn print_products(products: &[Product]) {
    if products.is_empty() {
        println!("No products.");
        return;
    }
    println!("{:<26} {:<28} {:>10}  DESCRIPTION", "ID", "NAME", "PRICE");
    for product in products {
        println!(
            "{:<26} {:<28} {:>10}  {}{}",
            product.id.as_str(),
            product.name,
            product.price.to_string(),
            product.description,
            if product.image.is_some() { " [image]" } else { "" }
        );
    }
}

/// List all products.
///
/// # Errors
///
/// Returns an error if the listing could not be fetched.
pub async fn list(ctx: &Context) -> Result<(), CommandError> {
    let mut admin = admin(ctx);
    admin.refresh().await?;
    print_products(admin.products());
    Ok(())
}

/// Create a product from the given fields.
///
/// # Errors
///
/// Returns an error if the image cannot be read, the fields are incomplete,
/// or the backend rejects the product.
pub async fn create(ctx: &Context, fields: ProductFields) -> Result<(), CommandError> {
    let mut admin = admin(ctx);
    admin.begin_add();

    let draft = admin.new_product_mut();
    draft.name = fields.name.unwrap_or_default();
    draft.description = fields.description.unwrap_or_default();
    draft.price = fields.price.map_or(Price::ZERO, Price::new);

    if let Some(path) = fields.image {
        admin.attach_image(path).await?;
    }

    let created = admin.submit_new_product().await?;
    tracing::info!(id = %created.id, "Product created");
    print_products(admin.products());
    Ok(())
}

/// Apply the given fields to an existing product.
///
/// # Errors
///
/// Returns an error if the product is not listed, the image cannot be read,
/// or the backend rejects the update.
pub async fn update(ctx: &Context, id: &ProductId, fields: ProductFields) -> Result<(), CommandError> {
    let mut admin = admin(ctx);
    admin.refresh().await?;

    let product = admin
        .products()
        .iter()
        .find(|p| &p.id == id)
        .cloned()
        .ok_or_else(|| CommandError::UnknownProduct(id.to_string()))?;
    admin.begin_edit(&product);

    if let Some(draft) = admin.editing_mut() {
        if let Some(name) = fields.name {
            draft.name = name;
        }
        if let Some(description) = fields.description {
            draft.description = description;
        }
        if let Some(price) = fields.price {
            draft.price = Price::new(price);
        }
    }

    if let Some(path) = fields.image {
        admin.attach_image(path).await?;
    }

    admin.submit_edit().await?;
    print_products(admin.products());
    Ok(())
}

/// Delete a product after confirmation.
///
/// # Errors
///
/// Returns an error if the backend refuses the deletion.
pub async fn delete(ctx: &Context, id: &ProductId) -> Result<(), CommandError> {
    let mut admin = admin(ctx);
    // A failed load only costs the product name in the prompt.
    let _ = admin.refresh().await;

    if admin.request_delete(id).await? {
        print_products(admin.products());
    } else {
        println!("Deletion cancelled.");
    }
    Ok(())
}
