//! Product and product draft.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A catalog product as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Server-assigned identifier, immutable once assigned.
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    /// Data URI or URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Product {
    /// The draft fields of this product, without its identifier.
    #[must_use]
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            image: self.image.clone(),
        }
    }
}

/// A product that has not been created yet and has no identifier.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ProductDraft {
    /// Create a draft without an image.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: Price) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
            image: None,
        }
    }

    /// Presence and positivity check performed before any create call.
    ///
    /// Name and description must be non-empty and the price must be greater
    /// than zero. Nothing else is validated client-side.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        !self.name.is_empty() && !self.description.is_empty() && self.price.is_positive()
    }
}
