//! Error types for the service, service review and booking actors.

use thiserror::Error;

use crate::model::BookingStatus;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    #[error("Service not found: {0}")]
    NotFound(String),

    #[error("Service validation error: {0}")]
    ValidationError(String),

    #[error("Service {0} is not taking bookings")]
    Unavailable(String),

    #[error("Booking cannot move from {from:?} to {to:?}")]
    InvalidBookingTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for ServiceError {
    fn from(msg: String) -> Self {
        ServiceError::ActorCommunicationError(msg)
    }
}
