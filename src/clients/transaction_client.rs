use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::model::{
    PropertyId, Transaction, TransactionCreate, TransactionId, TransactionQuery, TransactionStatus,
    UserId,
};
use crate::replication::ReplicatedStore;
use crate::transaction_actor::{TransactionAction, TransactionError};

/// Client for the transaction store and its mirror.
#[derive(Clone)]
pub struct TransactionClient {
    store: ReplicatedStore<Transaction>,
}

fn newest_first(mut transactions: Vec<Transaction>) -> Vec<Transaction> {
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
    transactions
}

impl TransactionClient {
    pub fn new(store: ReplicatedStore<Transaction>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ReplicatedStore<Transaction> {
        &self.store
    }

    /// Inserts into the local store only. Mirroring is the caller's decision.
    #[instrument(skip(self, params), fields(property = %params.property_id, buyer = %params.buyer_id))]
    pub async fn insert(&self, params: TransactionCreate) -> Result<TransactionId, TransactionError> {
        debug!("Sending request");
        let id = self.inner().create(params).await.map_err(Self::map_error)?;
        info!(%id, "Transaction recorded");
        Ok(id)
    }

    /// Moves a transaction to `status`, returning the status it had before.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: TransactionId,
        status: TransactionStatus,
    ) -> Result<TransactionStatus, TransactionError> {
        debug!("Sending request");
        self.inner()
            .perform_action(id, TransactionAction::TransitionTo(status))
            .await
            .map_err(Self::map_error)
    }

    pub async fn put(&self, transaction: Transaction) -> Result<(), TransactionError> {
        self.inner().put(transaction).await.map_err(Self::map_error)
    }

    /// Every transaction where `user` is buyer or seller, across both stores, newest first.
    #[instrument(skip(self))]
    pub async fn list_for_user(&self, user: UserId) -> Result<Vec<Transaction>, TransactionError> {
        self.store
            .list_merged(TransactionQuery::ByUser(user))
            .await
            .map(newest_first)
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn list_for_property(&self, property: PropertyId) -> Result<Vec<Transaction>, TransactionError> {
        self.store
            .list_merged(TransactionQuery::ByProperty(property))
            .await
            .map(newest_first)
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn list_by_status(&self, status: TransactionStatus) -> Result<Vec<Transaction>, TransactionError> {
        self.list(TransactionQuery::ByStatus(status)).await.map(newest_first)
    }
}

#[async_trait]
impl ActorClient<Transaction> for TransactionClient {
    type Error = TransactionError;

    fn inner(&self) -> &ResourceClient<Transaction> {
        self.store.local()
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<TransactionError>() {
            Ok(typed) => typed,
            Err(FrameworkError::NotFound(id)) => TransactionError::NotFound(id),
            Err(other) => TransactionError::ActorCommunicationError(other.to_string()),
        }
    }
}
