//! Error types for the Transaction actor.

use thiserror::Error;

use crate::model::{TransactionStatus, UserId};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransactionError {
    #[error("Transaction not found: {0}")]
    NotFound(String),

    /// Buyer and seller must differ on every stored transaction.
    #[error("Buyer {0} cannot also be the seller")]
    SameParty(UserId),

    #[error("Transaction cannot move from {from} to {to}")]
    InvalidTransition {
        from: TransactionStatus,
        to: TransactionStatus,
    },

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for TransactionError {
    fn from(msg: String) -> Self {
        TransactionError::ActorCommunicationError(msg)
    }
}
