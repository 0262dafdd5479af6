//! # ActorEntity Trait
//!
//! The contract a record type fulfils to be stored by a [`ResourceActor`](crate::ResourceActor).
//! Listings, transactions, users and the review satellites all implement it, so one actor loop
//! serves every store in the system.
//!
//! Associated types keep each store strongly typed: a `Property` actor only accepts
//! `PropertyCreate` payloads and `PropertyQuery` filters.
//!
//! # Provided Methods (Hooks)
//! [`ActorEntity::on_create`], [`ActorEntity::on_delete`] and [`ActorEntity::validate`]
//! default to `Ok(())`. [`ActorEntity::conflicts_with`] defaults to no conflict.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any stored record must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// Hooks are async so they can call other actors. The `Context` type is handed to every hook
/// by [`ResourceActor::run`](crate::ResourceActor::run), which lets dependencies be wired after
/// construction.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Identifier of the record. Generated by the actor's id function on `Create`.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// Payload required to create a new record.
    type Create: Send + Sync + Debug;

    /// Payload for in-place edits.
    type Update: Send + Sync + Debug;

    /// Record-specific operations (e.g. a conditional flag flip).
    type Action: Send + Sync + Debug;

    /// Result type returned by actions.
    type ActionResult: Send + Sync + Debug;

    /// Filter evaluated by the actor for `List` requests.
    type Query: Send + Sync + Debug + Clone;

    /// Runtime dependencies injected into the actor. Use `()` when there are none.
    type Context: Send + Sync;

    /// One error enum per store; the framework boxes it into
    /// [`FrameworkError::EntityError`](crate::FrameworkError::EntityError) and clients can
    /// recover it with [`FrameworkError::downcast_entity`](crate::FrameworkError::downcast_entity).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the record from a freshly generated id and the create payload.
    /// Validation that needs no other actor belongs here.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// The record's own id. Used by `Put` to upsert replicated copies.
    fn id(&self) -> &Self::Id;

    /// Whether this record belongs in the result of `query`.
    fn matches(&self, query: &Self::Query) -> bool;

    /// Invariants every stored record must hold. Checked again on `Put`, since a replicated
    /// copy never passed through `from_create_params`.
    fn validate(&self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Uniqueness rules across records, e.g. a username.
    ///
    /// Evaluated by the actor against every other stored record on `Create` and `Put`, in the
    /// same step as the insert, so two racing creates cannot both pass.
    fn conflicts_with(&self, _other: &Self) -> Option<Self::Error> {
        None
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after `from_create_params`, before the record is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received. Returning an error leaves the stored record
    /// untouched only if the hook validates before mutating.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the record is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle a record-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
