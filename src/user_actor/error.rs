//! Error types for the User actor and account operations.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    /// Unknown username or wrong password; callers cannot tell which.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Password hashing failed")]
    PasswordHash,

    #[error("User validation error: {0}")]
    ValidationError(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for UserError {
    fn from(msg: String) -> Self {
        UserError::ActorCommunicationError(msg)
    }
}
