//! # Actor Framework
//!
//! Building blocks for in-memory record stores that are each owned by a single Tokio task.
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]): the record type, its payloads, its queries and its hooks.
//! 2. **Runtime** ([`ResourceActor`]): the message loop that owns the table.
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]): typed request/response handles.
//!
//! ## Requests
//!
//! Every store answers `Create`, `Get`, `Put`, `List`, `Update`, `Delete` and `Action`.
//! `Put` upserts a full record under its own id; it is what replication uses to copy records
//! between a local store and a remote mirror. `List` evaluates [`ActorEntity::matches`] inside
//! the actor and returns clones.
//!
//! ## Concurrency Model
//!
//! - One task per store, one message at a time, no locks around the table.
//! - A single request is atomic. Sequences of requests are not; callers that need a
//!   check-then-act must express it as one `Action`.
//! - Stores run in parallel with each other.
//!
//! ## Context Injection
//!
//! Dependencies are handed to [`ResourceActor::run`] rather than to the constructor, so stores
//! can be created first and wired afterwards:
//!
//! ```rust
//! use actor_framework::{ActorEntity, ResourceActor, ResourceClient};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Seller { id: String }
//! #[derive(Debug, thiserror::Error)] #[error("seller error")] struct SellerError;
//!
//! #[async_trait]
//! impl ActorEntity for Seller {
//!     type Id = String; type Create = (); type Update = (); type Action = ();
//!     type ActionResult = (); type Query = (); type Context = (); type Error = SellerError;
//!     fn from_create_params(id: String, _: ()) -> Result<Self, SellerError> { Ok(Self { id }) }
//!     fn id(&self) -> &String { &self.id }
//!     fn matches(&self, _: &()) -> bool { true }
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), SellerError> { Ok(()) }
//!     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), SellerError> { Ok(()) }
//! }
//!
//! #[derive(Clone, Debug)] struct Listing { id: String, seller: String }
//! #[derive(Debug, thiserror::Error)]
//! enum ListingError {
//!     #[error("unknown seller {0}")]
//!     UnknownSeller(String),
//! }
//!
//! #[async_trait]
//! impl ActorEntity for Listing {
//!     type Id = String; type Create = String; type Update = (); type Action = ();
//!     type ActionResult = (); type Query = ();
//!     type Context = ResourceClient<Seller>;
//!     type Error = ListingError;
//!     fn from_create_params(id: String, seller: String) -> Result<Self, ListingError> {
//!         Ok(Self { id, seller })
//!     }
//!     fn id(&self) -> &String { &self.id }
//!     fn matches(&self, _: &()) -> bool { true }
//!     async fn on_create(&mut self, sellers: &ResourceClient<Seller>) -> Result<(), ListingError> {
//!         match sellers.get(self.seller.clone()).await {
//!             Ok(Some(_)) => Ok(()),
//!             _ => Err(ListingError::UnknownSeller(self.seller.clone())),
//!         }
//!     }
//!     async fn on_update(&mut self, _: (), _: &ResourceClient<Seller>) -> Result<(), ListingError> { Ok(()) }
//!     async fn handle_action(&mut self, _: (), _: &ResourceClient<Seller>) -> Result<(), ListingError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (seller_actor, sellers) = ResourceActor::<Seller>::new(8, || "s1".to_string());
//!     let (listing_actor, listings) = ResourceActor::<Listing>::new(8, || "l1".to_string());
//!
//!     tokio::spawn(seller_actor.run(()));
//!     tokio::spawn(listing_actor.run(sellers.clone()));
//!
//!     assert!(listings.create("s1".into()).await.is_err());
//!     sellers.create(()).await.unwrap();
//!     assert!(listings.create("s1".into()).await.is_ok());
//! }
//! ```
//!
//! Keep the dependency graph acyclic: an actor only stops once every client of its mailbox,
//! including the ones held in other actors' contexts, has been dropped.
//!
//! ## Testing
//!
//! See the [`mock`] module for scripted stores and channel-level helpers.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
