//! # Transaction Actor
//!
//! Stores purchase records. Creation rejects a buyer who is also the seller; afterwards only the
//! status moves, through [`TransactionAction::TransitionTo`].

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::{Transaction, TransactionId};
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a transaction store with a mailbox of `buffer` messages.
pub fn new(buffer: usize) -> (ResourceActor<Transaction>, ResourceClient<Transaction>) {
    ResourceActor::new(buffer, TransactionId::generate)
}
