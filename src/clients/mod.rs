//! Typed wrappers around [`ResourceClient`](actor_framework::ResourceClient).
//!
//! Each client maps framework errors back to its store's own error type and adds the
//! domain-level operations on top of the raw store calls.

pub mod locality_client;
pub mod property_client;
pub mod service_client;
pub mod transaction_client;

pub use locality_client::*;
pub use property_client::*;
pub use service_client::*;
pub use transaction_client::*;
