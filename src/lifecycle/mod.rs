//! Starting, wiring and stopping the store actors.
//!
//! - [`MarketSystem`] spawns every store and hands out the clients and services built on them
//! - [`setup_tracing`] installs the log subscriber

pub mod market_system;
pub mod tracing;

pub use market_system::*;
pub use self::tracing::*;
