//! Error types for the Property actor.

use thiserror::Error;

use crate::model::{PropertyId, UserId};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PropertyError {
    #[error("Property not found: {0}")]
    NotFound(String),

    #[error("Invalid listing: {0}")]
    ValidationError(String),

    /// Someone other than the seller tried to edit or remove the listing.
    #[error("User {user} does not own property {property}")]
    NotOwner { property: PropertyId, user: UserId },

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for PropertyError {
    fn from(msg: String) -> Self {
        PropertyError::ActorCommunicationError(msg)
    }
}
