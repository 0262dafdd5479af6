//! # ActorClient Trait
//!
//! Shared surface for store-specific client wrappers: reads, listing and deletion come for free
//! once a wrapper says how to reach its `ResourceClient` and how to translate framework errors.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for store-specific clients to inherit the generic operations.
///
/// # Example
///
/// ```rust
/// use actor_framework::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Review { id: String, stars: u8 }
/// #[derive(Debug)] struct ReviewCreate(u8);
/// #[derive(Debug, thiserror::Error)]
/// enum ReviewError {
///     #[error("actor communication error: {0}")]
///     Comms(String),
/// }
/// impl From<String> for ReviewError { fn from(s: String) -> Self { ReviewError::Comms(s) } }
///
/// #[async_trait]
/// impl ActorEntity for Review {
///     type Id = String; type Create = ReviewCreate; type Update = ();
///     type Action = (); type ActionResult = (); type Query = u8;
///     type Context = (); type Error = ReviewError;
///     fn from_create_params(id: String, p: ReviewCreate) -> Result<Self, ReviewError> {
///         Ok(Self { id, stars: p.0 })
///     }
///     fn id(&self) -> &String { &self.id }
///     fn matches(&self, min_stars: &u8) -> bool { self.stars >= *min_stars }
///     async fn on_update(&mut self, _: (), _: &()) -> Result<(), ReviewError> { Ok(()) }
///     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), ReviewError> { Ok(()) }
/// }
///
/// struct ReviewClient { inner: ResourceClient<Review> }
///
/// #[async_trait]
/// impl ActorClient<Review> for ReviewClient {
///     type Error = ReviewError;
///     fn inner(&self) -> &ResourceClient<Review> { &self.inner }
///     fn map_error(e: FrameworkError) -> ReviewError { ReviewError::Comms(e.to_string()) }
/// }
///
/// async fn four_stars_and_up(client: &ReviewClient) -> Result<Vec<Review>, ReviewError> {
///     client.list(4).await
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The store-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the store-specific error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch a record by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every record matching `query`, unordered.
    #[tracing::instrument(skip(self))]
    async fn list(&self, query: T::Query) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list(query).await.map_err(Self::map_error)
    }

    /// Remove a record by id.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
