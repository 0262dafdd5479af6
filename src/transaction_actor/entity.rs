//! [`ActorEntity`] implementation for [`Transaction`].

use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;

use super::actions::TransactionAction;
use super::error::TransactionError;
use crate::model::{Transaction, TransactionCreate, TransactionId, TransactionQuery, TransactionStatus};

#[async_trait]
impl ActorEntity for Transaction {
    type Id = TransactionId;
    type Create = TransactionCreate;
    // Transactions are immutable apart from their status.
    type Update = ();
    type Action = TransactionAction;
    type ActionResult = TransactionStatus;
    type Query = TransactionQuery;
    type Context = ();
    type Error = TransactionError;

    fn from_create_params(id: TransactionId, params: TransactionCreate) -> Result<Self, Self::Error> {
        let transaction = Self {
            id,
            property_id: params.property_id,
            buyer_id: params.buyer_id,
            seller_id: params.seller_id,
            price: params.price,
            date: Utc::now(),
            status: params.status,
        };
        transaction.validate()?;
        Ok(transaction)
    }

    fn id(&self) -> &TransactionId {
        &self.id
    }

    fn validate(&self) -> Result<(), Self::Error> {
        if self.buyer_id == self.seller_id {
            return Err(TransactionError::SameParty(self.buyer_id.clone()));
        }
        Ok(())
    }

    fn matches(&self, query: &TransactionQuery) -> bool {
        match query {
            TransactionQuery::ByUser(user) => self.involves(user),
            TransactionQuery::ByProperty(property) => &self.property_id == property,
            TransactionQuery::ByStatus(status) => &self.status == status,
        }
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: TransactionAction,
        _ctx: &(),
    ) -> Result<TransactionStatus, Self::Error> {
        match action {
            TransactionAction::TransitionTo(next) => {
                let previous = self.status;
                if !previous.can_become(next) {
                    return Err(TransactionError::InvalidTransition {
                        from: previous,
                        to: next,
                    });
                }
                self.status = next;
                Ok(previous)
            }
        }
    }
}
