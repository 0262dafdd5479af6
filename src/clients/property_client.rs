use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::model::{Property, PropertyCreate, PropertyFilter, PropertyId, PropertyQuery, PropertyUpdate, UserId};
use crate::property_actor::{PropertyAction, PropertyActionResult, PropertyError};
use crate::replication::ReplicatedStore;

/// Client for the property store and its mirror.
///
/// Listing reads and owner edits are plain store calls. The sold flag is only changed through
/// [`mark_sold`](Self::mark_sold) and [`mark_available`](Self::mark_available), which always
/// run against the local store.
#[derive(Clone)]
pub struct PropertyClient {
    store: ReplicatedStore<Property>,
}

fn newest_first(mut properties: Vec<Property>) -> Vec<Property> {
    properties.sort_by(|a, b| b.date_posted.cmp(&a.date_posted));
    properties
}

impl PropertyClient {
    pub fn new(store: ReplicatedStore<Property>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ReplicatedStore<Property> {
        &self.store
    }

    #[instrument(skip(self, params), fields(seller = %params.seller_id))]
    pub async fn create_listing(&self, params: PropertyCreate) -> Result<PropertyId, PropertyError> {
        debug!("Sending request");
        let id = self
            .store
            .local()
            .create(params)
            .await
            .map_err(Self::map_error)?;
        self.store.mirror_from_local(&id).await;
        info!(%id, "Listing created");
        Ok(id)
    }

    /// Current version of a listing, mirror first.
    #[instrument(skip(self))]
    pub async fn fetch_current(&self, id: &PropertyId) -> Result<Option<Property>, PropertyError> {
        self.store.fetch_current(id).await.map_err(Self::map_error)
    }

    /// Unsold listings, newest first.
    #[instrument(skip(self))]
    pub async fn list_available(&self) -> Result<Vec<Property>, PropertyError> {
        self.list(PropertyQuery::Available).await.map(newest_first)
    }

    #[instrument(skip(self))]
    pub async fn list_by_seller(&self, seller: UserId) -> Result<Vec<Property>, PropertyError> {
        self.list(PropertyQuery::BySeller(seller)).await.map(newest_first)
    }

    /// Case-insensitive match on city, address or title, newest first.
    #[instrument(skip(self))]
    pub async fn search(&self, text: &str) -> Result<Vec<Property>, PropertyError> {
        self.list(PropertyQuery::Search(text.to_string()))
            .await
            .map(newest_first)
    }

    /// Unsold listings within the given bounds.
    #[instrument(skip(self))]
    pub async fn filter(&self, filter: PropertyFilter) -> Result<Vec<Property>, PropertyError> {
        self.list(PropertyQuery::Filter(filter)).await.map(newest_first)
    }

    #[instrument(skip(self, update), fields(requested_by = %update.requested_by))]
    pub async fn update_listing(&self, id: PropertyId, update: PropertyUpdate) -> Result<Property, PropertyError> {
        debug!("Sending request");
        let updated = self
            .store
            .local()
            .update(id, update)
            .await
            .map_err(Self::map_error)?;
        self.store.mirror_put(updated.clone()).await;
        Ok(updated)
    }

    /// Removes a listing. Only its seller may do this.
    #[instrument(skip(self))]
    pub async fn delete_listing(&self, id: PropertyId, requested_by: UserId) -> Result<(), PropertyError> {
        let property = self
            .get(id.clone())
            .await?
            .ok_or_else(|| PropertyError::NotFound(id.to_string()))?;
        if property.seller_id != requested_by {
            return Err(PropertyError::NotOwner {
                property: id,
                user: requested_by,
            });
        }
        self.delete(id.clone()).await?;
        self.store.mirror_delete(&id).await;
        info!(%id, "Listing deleted");
        Ok(())
    }

    /// Upsert of a complete record into the local store.
    pub async fn put(&self, property: Property) -> Result<(), PropertyError> {
        self.inner().put(property).await.map_err(Self::map_error)
    }

    /// Sets the sold flag if it is clear. Returns whether this call flipped it.
    #[instrument(skip(self))]
    pub async fn mark_sold(&self, id: PropertyId) -> Result<bool, PropertyError> {
        debug!("Sending request");
        match self
            .inner()
            .perform_action(id, PropertyAction::MarkSold)
            .await
            .map_err(Self::map_error)?
        {
            PropertyActionResult::MarkSold(flipped) => Ok(flipped),
            other => Err(PropertyError::ActorCommunicationError(format!(
                "unexpected reply to MarkSold: {other:?}"
            ))),
        }
    }

    /// Clears the sold flag. Returns whether this call flipped it.
    #[instrument(skip(self))]
    pub async fn mark_available(&self, id: PropertyId) -> Result<bool, PropertyError> {
        debug!("Sending request");
        match self
            .inner()
            .perform_action(id, PropertyAction::MarkAvailable)
            .await
            .map_err(Self::map_error)?
        {
            PropertyActionResult::MarkAvailable(flipped) => Ok(flipped),
            other => Err(PropertyError::ActorCommunicationError(format!(
                "unexpected reply to MarkAvailable: {other:?}"
            ))),
        }
    }
}

#[async_trait]
impl ActorClient<Property> for PropertyClient {
    type Error = PropertyError;

    fn inner(&self) -> &ResourceClient<Property> {
        self.store.local()
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<PropertyError>() {
            Ok(typed) => typed,
            Err(FrameworkError::NotFound(id)) => PropertyError::NotFound(id),
            Err(other) => PropertyError::ActorCommunicationError(other.to_string()),
        }
    }
}
