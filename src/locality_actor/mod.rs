//! # Locality Actors
//!
//! Two stores: localities, and the reviews left for them. The locality store depends on the
//! review store through [`LocalityContext`]; the review store has no dependencies.

pub mod entity;
pub mod error;

pub use entity::{LocalityAction, LocalityContext};
pub use error::*;

use crate::model::{Locality, LocalityId, LocalityReview, LocalityReviewId};
use actor_framework::{ResourceActor, ResourceClient};

pub fn new(buffer: usize) -> (ResourceActor<Locality>, ResourceClient<Locality>) {
    ResourceActor::new(buffer, LocalityId::generate)
}

pub fn new_reviews(buffer: usize) -> (ResourceActor<LocalityReview>, ResourceClient<LocalityReview>) {
    ResourceActor::new(buffer, LocalityReviewId::generate)
}
