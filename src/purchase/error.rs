//! Errors returned by the purchase workflow.

use thiserror::Error;

use crate::model::{PropertyId, TransactionId};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PurchaseError {
    #[error("Property is already sold")]
    AlreadySold,

    #[error("Sellers cannot buy their own property")]
    SelfPurchase,

    #[error("A signed-in buyer is required")]
    NotAuthenticated,

    #[error("Property not found: {0}")]
    PropertyNotFound(PropertyId),

    /// The caller's copy showed the property as available but another purchase got there first.
    #[error("Property was sold while this purchase was in progress")]
    ConcurrentlySold,

    /// A required local write failed. Nothing the workflow wrote before it was left behind,
    /// except where logged as a failed compensation.
    #[error("Could not save purchase: {0}")]
    PersistenceFailure(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CancelError {
    #[error("Transaction not found: {0}")]
    NotFound(TransactionId),

    #[error("Transaction {0} is already cancelled")]
    AlreadyCancelled(TransactionId),

    #[error("Could not cancel transaction: {0}")]
    PersistenceFailure(String),

    /// The transaction is cancelled but its property is still marked sold.
    #[error("Transaction {transaction} cancelled but property {property} is still marked sold: {reason}")]
    CompensationFailed {
        transaction: TransactionId,
        property: PropertyId,
        reason: String,
    },
}
