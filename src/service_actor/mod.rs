//! # Service Actors
//!
//! Home services, their reviews, and bookings against them. Dependencies run one way:
//! bookings look up services, services read their reviews.
//!
//! - [`entity`] - [`Service`] and [`ServiceReview`](crate::model::ServiceReview)
//! - [`booking`] - [`ServiceBooking`](crate::model::ServiceBooking)

pub mod actions;
pub mod booking;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::{
    Service, ServiceBooking, ServiceBookingId, ServiceId, ServiceReview, ServiceReviewId,
};
use actor_framework::{ResourceActor, ResourceClient};

pub fn new(buffer: usize) -> (ResourceActor<Service>, ResourceClient<Service>) {
    ResourceActor::new(buffer, ServiceId::generate)
}

pub fn new_reviews(buffer: usize) -> (ResourceActor<ServiceReview>, ResourceClient<ServiceReview>) {
    ResourceActor::new(buffer, ServiceReviewId::generate)
}

pub fn new_bookings(buffer: usize) -> (ResourceActor<ServiceBooking>, ResourceClient<ServiceBooking>) {
    ResourceActor::new(buffer, ServiceBookingId::generate)
}
