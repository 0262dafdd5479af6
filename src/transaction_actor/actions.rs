use crate::model::TransactionStatus;

#[derive(Debug, Clone)]
pub enum TransactionAction {
    /// Moves the transaction to a new status if the transition is allowed.
    /// Returns the status it had before.
    TransitionTo(TransactionStatus),
}
