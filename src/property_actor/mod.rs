//! # Property Actor
//!
//! The property store. Listings are created by sellers, edited only by their seller, and
//! flagged sold only through [`PropertyAction::MarkSold`], a conditional update that reports
//! whether it actually flipped the flag.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for
//!   [`Property`](crate::model::Property)
//! - [`error`] - [`PropertyError`]
//! - [`actions`] - [`PropertyAction`] and [`PropertyActionResult`]
//! - [`new()`] - factory for the actor and its client

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::{Property, PropertyId};
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a property store with a mailbox of `buffer` messages.
pub fn new(buffer: usize) -> (ResourceActor<Property>, ResourceClient<Property>) {
    ResourceActor::new(buffer, PropertyId::generate)
}
