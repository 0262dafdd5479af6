use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::{PropertyId, TransactionId, UserId};

/// Lifecycle of a purchase record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Cancelled,
}

impl TransactionStatus {
    /// Pending may complete or cancel, Completed may cancel, Cancelled is final.
    pub fn can_become(self, next: TransactionStatus) -> bool {
        use TransactionStatus::*;
        matches!(
            (self, next),
            (Pending, Completed) | (Pending, Cancelled) | (Completed, Cancelled)
        )
    }
}

impl Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Completed => "COMPLETED",
            TransactionStatus::Cancelled => "CANCELLED",
        };
        f.write_str(label)
    }
}

/// A purchase of one property by one buyer.
///
/// `seller_id` and `price` are copied from the property at purchase time and never follow later
/// listing edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub property_id: PropertyId,
    pub buyer_id: UserId,
    pub seller_id: UserId,
    pub price: Decimal,
    pub date: DateTime<Utc>,
    pub status: TransactionStatus,
}

impl Transaction {
    pub fn involves(&self, user: &UserId) -> bool {
        &self.buyer_id == user || &self.seller_id == user
    }
}

#[derive(Debug, Clone)]
pub struct TransactionCreate {
    pub property_id: PropertyId,
    pub buyer_id: UserId,
    pub seller_id: UserId,
    pub price: Decimal,
    pub status: TransactionStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransactionQuery {
    /// Transactions where the user is buyer or seller.
    ByUser(UserId),
    ByProperty(PropertyId),
    ByStatus(TransactionStatus),
}
