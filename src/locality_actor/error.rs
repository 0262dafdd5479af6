//! Error types for the Locality and LocalityReview actors.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LocalityError {
    #[error("Locality not found: {0}")]
    NotFound(String),

    #[error("Locality already exists: {name}, {city}")]
    AlreadyExists { name: String, city: String },

    #[error("Locality validation error: {0}")]
    ValidationError(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for LocalityError {
    fn from(msg: String) -> Self {
        LocalityError::ActorCommunicationError(msg)
    }
}
