//! # Purchase Workflow
//!
//! Turns a buyer's request into a completed [`Transaction`](crate::model::Transaction) and a
//! sold [`Property`], and undoes that pair on cancellation.
//!
//! The workflow owns no state. It coordinates the property and transaction stores, both of
//! which are authoritative locally and mirrored best-effort.
//!
//! ## Claiming a property
//!
//! Two strategies are available, chosen by [`ClaimStrategy`]:
//!
//! - [`ClaimStrategy::ConditionalUpdate`] (default): the sold flag is set with a conditional
//!   update in the property store, and only the caller whose update flipped the flag goes on
//!   to record a transaction. At most one buyer wins per property.
//! - [`ClaimStrategy::ReadThenWrite`]: re-fetch, record the transaction, then set the flag
//!   without checking whether it was already set. Two buyers who pass the re-fetch at the
//!   same time can both succeed.
//!
//! ## Cancellation
//!
//! Cancelling is two writes to two stores with no commit spanning them. If the property
//! cannot be flipped back after the transaction is cancelled, the caller gets
//! [`CancelError::CompensationFailed`] and the property stays marked sold.

pub mod error;

use std::str::FromStr;

use tracing::{debug, error, info, instrument, warn};

pub use error::*;

use crate::clients::{PropertyClient, TransactionClient};
use crate::model::{
    Property, PropertyId, Transaction, TransactionCreate, TransactionId, TransactionStatus, UserId,
};
use crate::property_actor::PropertyError;
use crate::transaction_actor::TransactionError;
use actor_framework::ActorClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClaimStrategy {
    #[default]
    ConditionalUpdate,
    ReadThenWrite,
}

impl FromStr for ClaimStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "conditional" => Ok(ClaimStrategy::ConditionalUpdate),
            "read-then-write" => Ok(ClaimStrategy::ReadThenWrite),
            other => Err(format!("unknown purchase mode: {other}")),
        }
    }
}

#[derive(Clone)]
pub struct PurchaseWorkflow {
    properties: PropertyClient,
    transactions: TransactionClient,
    strategy: ClaimStrategy,
}

impl PurchaseWorkflow {
    pub fn new(properties: PropertyClient, transactions: TransactionClient, strategy: ClaimStrategy) -> Self {
        Self {
            properties,
            transactions,
            strategy,
        }
    }

    pub fn strategy(&self) -> ClaimStrategy {
        self.strategy
    }

    /// Buys `snapshot` for `buyer`.
    ///
    /// `snapshot` is whatever copy of the listing the caller was looking at. It is only used
    /// for the cheap up-front checks; price and seller on the recorded transaction come from
    /// a fresh read.
    #[instrument(skip(self, snapshot), fields(property = %snapshot.id, strategy = ?self.strategy))]
    pub async fn purchase(&self, snapshot: &Property, buyer: &UserId) -> Result<TransactionId, PurchaseError> {
        if snapshot.is_sold {
            return Err(PurchaseError::AlreadySold);
        }
        if *buyer == snapshot.seller_id {
            return Err(PurchaseError::SelfPurchase);
        }
        if buyer.is_empty() {
            return Err(PurchaseError::NotAuthenticated);
        }

        let current = self
            .properties
            .fetch_current(&snapshot.id)
            .await
            .map_err(|e| PurchaseError::PersistenceFailure(e.to_string()))?
            .ok_or_else(|| PurchaseError::PropertyNotFound(snapshot.id.clone()))?;
        if current.is_sold {
            debug!("Re-fetched copy is already sold");
            return Err(PurchaseError::ConcurrentlySold);
        }
        // The listing may have changed hands since the snapshot was taken.
        if *buyer == current.seller_id {
            return Err(PurchaseError::SelfPurchase);
        }

        let transaction_id = match self.strategy {
            ClaimStrategy::ConditionalUpdate => self.claim_then_record(&current, buyer).await?,
            ClaimStrategy::ReadThenWrite => self.record_then_flag(&current, buyer).await?,
        };

        self.transactions.store().mirror_from_local(&transaction_id).await;
        self.properties.store().mirror_from_local(&current.id).await;

        info!(%transaction_id, buyer = %buyer, "Purchase completed");
        Ok(transaction_id)
    }

    fn completed_sale(current: &Property, buyer: &UserId) -> TransactionCreate {
        TransactionCreate {
            property_id: current.id.clone(),
            buyer_id: buyer.clone(),
            seller_id: current.seller_id.clone(),
            price: current.price,
            status: TransactionStatus::Completed,
        }
    }

    async fn claim_then_record(&self, current: &Property, buyer: &UserId) -> Result<TransactionId, PurchaseError> {
        let claimed = match self.properties.mark_sold(current.id.clone()).await {
            Ok(claimed) => claimed,
            Err(PropertyError::NotFound(_)) => {
                return Err(PurchaseError::PropertyNotFound(current.id.clone()))
            }
            Err(e) => return Err(PurchaseError::PersistenceFailure(e.to_string())),
        };
        if !claimed {
            debug!("Conditional update lost");
            return Err(PurchaseError::ConcurrentlySold);
        }

        match self.transactions.insert(Self::completed_sale(current, buyer)).await {
            Ok(id) => Ok(id),
            Err(e) => {
                warn!(error = %e, "Recording transaction failed, releasing property");
                if let Err(undo) = self.properties.mark_available(current.id.clone()).await {
                    error!(
                        property = %current.id,
                        error = %undo,
                        "Could not release property after failed purchase"
                    );
                }
                Err(PurchaseError::PersistenceFailure(e.to_string()))
            }
        }
    }

    async fn record_then_flag(&self, current: &Property, buyer: &UserId) -> Result<TransactionId, PurchaseError> {
        let id = self
            .transactions
            .insert(Self::completed_sale(current, buyer))
            .await
            .map_err(|e| PurchaseError::PersistenceFailure(e.to_string()))?;

        // The flip result is ignored; a concurrent buyer may already have set it.
        if let Err(e) = self.properties.mark_sold(current.id.clone()).await {
            error!(transaction = %id, error = %e, "Transaction recorded but property not marked sold");
            return Err(PurchaseError::PersistenceFailure(e.to_string()));
        }
        Ok(id)
    }

    /// Cancels a transaction and releases its property.
    #[instrument(skip(self))]
    pub async fn cancel(&self, id: &TransactionId) -> Result<(), CancelError> {
        let transaction = self
            .transactions
            .get(id.clone())
            .await
            .map_err(|e| CancelError::PersistenceFailure(e.to_string()))?
            .ok_or_else(|| CancelError::NotFound(id.clone()))?;
        if transaction.status == TransactionStatus::Cancelled {
            return Err(CancelError::AlreadyCancelled(id.clone()));
        }

        match self
            .transactions
            .update_status(id.clone(), TransactionStatus::Cancelled)
            .await
        {
            Ok(_) => {}
            // Someone else cancelled it between the read and the write.
            Err(TransactionError::InvalidTransition {
                from: TransactionStatus::Cancelled,
                ..
            }) => return Err(CancelError::AlreadyCancelled(id.clone())),
            Err(TransactionError::NotFound(_)) => return Err(CancelError::NotFound(id.clone())),
            Err(e) => return Err(CancelError::PersistenceFailure(e.to_string())),
        }
        self.transactions.store().mirror_from_local(id).await;

        let property = transaction.property_id;
        if let Err(e) = self.properties.mark_available(property.clone()).await {
            error!(
                transaction = %id,
                property = %property,
                error = %e,
                "Transaction cancelled but property is still marked sold"
            );
            return Err(CancelError::CompensationFailed {
                transaction: id.clone(),
                property,
                reason: e.to_string(),
            });
        }
        self.properties.store().mirror_from_local(&property).await;

        info!(transaction = %id, %property, "Transaction cancelled");
        Ok(())
    }

    /// Transactions where `user` is buyer or seller, newest first.
    pub async fn list_transactions_for_user(&self, user: &UserId) -> Result<Vec<Transaction>, TransactionError> {
        self.transactions.list_for_user(user.clone()).await
    }

    pub async fn list_transactions_for_property(
        &self,
        property: &PropertyId,
    ) -> Result<Vec<Transaction>, TransactionError> {
        self.transactions.list_for_property(property.clone()).await
    }
}
