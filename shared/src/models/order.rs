//! Order Model (跑腿订单)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Posted, waiting for a rider
    Pending,
    /// Claimed by a rider
    Accepted,
    /// Rider has started the errand
    Processing,
    /// Delivered and confirmed
    Completed,
    /// Cancelled by the poster
    Cancelled,
}

impl OrderStatus {
    /// Parse from database string value (lowercase)
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "processing" => Some(Self::Processing),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Database string representation (lowercase)
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Counts against the rider's incomplete-order ceiling?
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Self::Accepted | Self::Processing)
    }

    /// Can a rider mark this order completed?
    pub fn can_complete(&self) -> bool {
        matches!(self, Self::Accepted | Self::Processing)
    }
}

/// Payment status, tracked separately from the delivery lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
    Cancelled,
}

impl PaymentStatus {
    /// Parse from database string value (lowercase)
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "paid" => Some(Self::Paid),
            "refunded" => Some(Self::Refunded),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Database string representation (lowercase)
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Refunded => "refunded",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Order entity
///
/// `status` / `payment_status` are stored as lowercase strings, parse via
/// [`OrderStatus::from_db`] / [`PaymentStatus::from_db`] when the enum is needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    /// Business order number (timestamp + random digits, unique)
    pub order_no: String,
    pub category_id: i64,
    /// Poster user ID
    pub user_id: i64,
    /// Assigned rider user ID, null while pending
    pub rider_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub pickup_address: String,
    pub delivery_address: String,
    /// Rider fee, NUMERIC(10,2)
    pub price: Decimal,
    pub status: String,
    pub payment_status: String,
    /// When a rider claimed the order (epoch millis)
    pub accepted_at: Option<i64>,
    pub completed_at: Option<i64>,
    pub created_at: i64,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub category_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub pickup_address: String,
    pub delivery_address: String,
    pub price: Decimal,
}

/// Result view of a successful auto-grab
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrabbedOrder {
    pub order_id: i64,
    pub order_no: String,
    /// Category code (e.g. "express")
    pub category: String,
    pub price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_db_roundtrip() {
        for s in [
            OrderStatus::Pending,
            OrderStatus::Accepted,
            OrderStatus::Processing,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::from_db(s.as_db()), Some(s));
        }
        assert_eq!(OrderStatus::from_db("bogus"), None);
    }

    #[test]
    fn incomplete_statuses() {
        assert!(OrderStatus::Accepted.is_incomplete());
        assert!(OrderStatus::Processing.is_incomplete());
        assert!(!OrderStatus::Pending.is_incomplete());
        assert!(!OrderStatus::Completed.is_incomplete());
        assert!(!OrderStatus::Cancelled.is_incomplete());
    }

    #[test]
    fn payment_status_db_roundtrip() {
        for s in [
            PaymentStatus::Pending,
            PaymentStatus::Paid,
            PaymentStatus::Refunded,
            PaymentStatus::Cancelled,
        ] {
            assert_eq!(PaymentStatus::from_db(s.as_db()), Some(s));
        }
    }
}
