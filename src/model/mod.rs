//! Record types and their payloads. The `ActorEntity` impls live next to each actor.

pub mod id;
pub mod locality;
pub mod property;
pub mod service;
pub mod transaction;
pub mod user;

pub use id::*;
pub use locality::*;
pub use property::*;
pub use service::*;
pub use transaction::*;
pub use user::*;
