//! Order status.
//!
//! The backend is the sole authority on which transitions are legal; this
//! type only names the lifecycle stages. Values outside the five known stages
//! are preserved verbatim so they can be displayed, but they never count as
//! any known stage.

use serde::{Deserialize, Serialize};

/// Order lifecycle stage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    /// A value the backend sent that is not one of the known stages. Empty
    /// when the backend sent no status at all.
    Unrecognized(String),
}

impl OrderStatus {
    /// The five known stages, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Returns true for the five known stages.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
            Self::Unrecognized(raw) if raw.is_empty() => "Unknown",
            Self::Unrecognized(raw) => raw,
        }
    }
}

/// The neutral unknown status, not any of the known stages.
impl Default for OrderStatus {
    fn default() -> Self {
        Self::Unrecognized(String::new())
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for OrderStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pending" => Self::Pending,
            "processing" => Self::Processing,
            "shipped" => Self::Shipped,
            "delivered" => Self::Delivered,
            "cancelled" => Self::Cancelled,
            _ => Self::Unrecognized(raw),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Unrecognized(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

/// Strict parsing: only the five known stages are accepted.
impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::from(s.to_ascii_lowercase()) {
            Self::Unrecognized(_) => Err(format!(
                "invalid order status: {s} (expected one of pending, processing, shipped, delivered, cancelled)"
            )),
            known => Ok(known),
        }
    }
}
