//! Orders, their line items and their buyer.
//!
//! The backend may either embed related documents or send only their
//! identifiers. Both shapes are decided here, at deserialization, and never
//! re-inspected at render time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::id::{OrderId, ProductId, UserId};
use super::price::Price;
use super::product::Product;
use super::status::OrderStatus;

/// A registered customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Who placed an order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Buyer {
    /// The backend embedded the full user record.
    Record(User),
    /// The backend sent only the user identifier.
    Id(UserId),
    /// The reference is `null` or absent, e.g. the user was deleted.
    #[default]
    Missing,
}

impl Buyer {
    /// Returns the embedded record, if any.
    #[must_use]
    pub const fn record(&self) -> Option<&User> {
        match self {
            Self::Record(user) => Some(user),
            Self::Id(_) | Self::Missing => None,
        }
    }

    /// The buyer's identifier, unless the reference is missing.
    #[must_use]
    pub const fn id(&self) -> Option<&UserId> {
        match self {
            Self::Record(user) => Some(&user.id),
            Self::Id(id) => Some(id),
            Self::Missing => None,
        }
    }

    /// Display text for the buyer column.
    ///
    /// Records show `name <email>` (or whichever part is present); bare
    /// identifiers show `User <id>`; a missing reference shows
    /// `Unknown customer`.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Record(user) => match (user.name.as_deref(), user.email.as_deref()) {
                (Some(name), Some(email)) if !name.is_empty() => format!("{name} <{email}>"),
                (Some(name), _) if !name.is_empty() => name.to_owned(),
                (_, Some(email)) => email.to_owned(),
                _ => format!("User {}", user.id),
            },
            Self::Id(id) => format!("User {id}"),
            Self::Missing => "Unknown customer".to_owned(),
        }
    }
}

/// Product referenced by an order line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductRef {
    Product(Product),
    Id(ProductId),
    /// The reference is `null` or absent, e.g. the product was deleted.
    #[default]
    Missing,
}

impl ProductRef {
    #[must_use]
    pub const fn id(&self) -> Option<&ProductId> {
        match self {
            Self::Product(product) => Some(&product.id),
            Self::Id(id) => Some(id),
            Self::Missing => None,
        }
    }

    /// Product name when embedded, otherwise the identifier.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Product(product) => &product.name,
            Self::Id(id) => id.as_str(),
            Self::Missing => "Unavailable product",
        }
    }
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default)]
    pub product: ProductRef,
    pub quantity: u32,
}

/// An order placed by a buyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: OrderId,
    #[serde(rename = "user", default)]
    pub buyer: Buyer,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    /// A `null` or absent status decodes to the neutral unknown status.
    #[serde(default, deserialize_with = "status_or_unknown")]
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

fn status_or_unknown<'de, D>(deserializer: D) -> Result<OrderStatus, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .map_or_else(OrderStatus::default, OrderStatus::from))
}

impl Order {
    /// Sum of item quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}
