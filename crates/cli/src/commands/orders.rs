//! Order processing commands.

#![allow(clippy::print_stdout)]

use shopfront_admin::{OrderAdmin, StatusCounts};
use shopfront_core::{Order, OrderId, OrderStatus};

use super::{CommandError, Context};

fn admin(ctx: &Context) -> OrderAdmin {
    OrderAdmin::new(ctx.order_store(), ctx.notifier())
}

fn print_orders(orders: &[Order]) {
    if orders.is_empty() {
        println!("No orders.");
        return;
    }
    println!(
        "{:<26} {:<32} {:>5} {:>10}  {:<12} {}",
        "ID", "CUSTOMER", "ITEMS", "TOTAL", "STATUS", "PLACED"
    );
    for order in orders {
        println!(
            "{:<26} {:<32} {:>5} {:>10}  {:<12} {}",
            order.id.as_str(),
            OrderAdmin::buyer_label(order),
            OrderAdmin::total_items(order),
            order
                .total_amount
                .map_or_else(|| "-".to_string(), |total| total.to_string()),
            order.status.label(),
            order
                .created_at
                .map_or_else(|| "-".to_string(), |at| at.format("%Y-%m-%d %H:%M").to_string()),
        );
    }
}

fn print_counts(counts: &StatusCounts) {
    for status in &OrderStatus::ALL {
        println!("{:<12} {:>5}", status.label(), counts.get(status));
    }
    if counts.unrecognized > 0 {
        println!("{:<12} {:>5}", "Other", counts.unrecognized);
    }
    println!("{:<12} {:>5}", "Total", counts.known_total() + counts.unrecognized);
}

/// List all orders.
///
/// # Errors
///
/// Returns an error if the listing could not be fetched.
pub async fn list(ctx: &Context) -> Result<(), CommandError> {
    let mut admin = admin(ctx);
    admin.refresh().await?;
    print_orders(admin.orders());
    Ok(())
}

/// Show the number of orders in each status.
///
/// # Errors
///
/// Returns an error if the listing could not be fetched.
pub async fn stats(ctx: &Context) -> Result<(), CommandError> {
    let mut admin = admin(ctx);
    admin.refresh().await?;
    print_counts(&admin.status_counts());
    Ok(())
}

/// Move an order to a new status.
///
/// # Errors
///
/// Returns an error if the backend rejects the change.
pub async fn set_status(ctx: &Context, id: &OrderId, status: OrderStatus) -> Result<(), CommandError> {
    let mut admin = admin(ctx);
    admin.change_status(id, status).await?;
    print_orders(admin.orders());
    Ok(())
}
