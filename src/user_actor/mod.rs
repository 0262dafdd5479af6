//! # User Actor
//!
//! Account records. Passwords are stored only as argon2 hashes; see
//! [`accounts::password`](crate::accounts::password).

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::{User, UserId};
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a user store with a mailbox of `buffer` messages.
pub fn new(buffer: usize) -> (ResourceActor<User>, ResourceClient<User>) {
    ResourceActor::new(buffer, UserId::generate)
}
