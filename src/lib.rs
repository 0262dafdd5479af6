//! # Property Market
//!
//! The core of a real-estate marketplace: sellers list properties, buyers purchase them, and
//! every sale is recorded as a transaction that can later be cancelled. Alongside listings
//! the market keeps neighbourhood (locality) ratings and a directory of home services.
//!
//! ## Stores
//!
//! Every entity lives in a [`ResourceActor`](actor_framework::ResourceActor) from the
//! `actor-framework` crate. An actor handles one request at a time, so each single store call
//! is atomic; nothing spans two stores.
//!
//! Properties, transactions and users are also kept in a mirror store. The local copy is
//! authoritative. [`replication::ReplicatedStore`] decides when the mirror is read and makes
//! sure its failures never surface.
//!
//! ## Module Tour
//!
//! - [`model`]: plain data types and identifiers
//! - [`property_actor`], [`transaction_actor`], [`user_actor`], [`locality_actor`],
//!   [`service_actor`]: the [`ActorEntity`](actor_framework::ActorEntity) implementation and
//!   error type for each store
//! - [`clients`]: typed clients over the stores
//! - [`replication`]: local store plus mirror
//! - [`purchase`]: buying and cancelling
//! - [`accounts`]: registration, login and sessions
//! - [`rating`]: review aggregation
//! - [`config`]: environment-driven settings
//! - [`lifecycle`]: spawning and stopping everything, and tracing setup
//!
//! ## Sessions
//!
//! There is no global "current user". [`accounts::AccountService::login`] returns a
//! [`Session`](model::Session) and callers pass the user id it carries into every operation
//! that acts on someone's behalf.

pub mod accounts;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod locality_actor;
pub mod model;
pub mod property_actor;
pub mod purchase;
pub mod rating;
pub mod replication;
pub mod service_actor;
pub mod transaction_actor;
pub mod user_actor;
