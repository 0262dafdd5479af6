use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::locality_actor::{LocalityAction, LocalityError};
use crate::model::{
    Locality, LocalityCreate, LocalityId, LocalityQuery, LocalityReview, LocalityReviewCreate,
    LocalityReviewId, LocalityReviewQuery,
};

/// Client for localities and their reviews.
#[derive(Clone)]
pub struct LocalityClient {
    localities: ResourceClient<Locality>,
    reviews: ResourceClient<LocalityReview>,
}

fn safest_first(mut localities: Vec<Locality>) -> Vec<Locality> {
    localities.sort_by(|a, b| b.safety_rating.total_cmp(&a.safety_rating));
    localities
}

impl LocalityClient {
    pub fn new(localities: ResourceClient<Locality>, reviews: ResourceClient<LocalityReview>) -> Self {
        Self {
            localities,
            reviews,
        }
    }

    /// Adds a locality unless one with the same name and city exists. The store rejects the
    /// duplicate in the same step as the insert.
    #[instrument(skip(self))]
    pub async fn create_locality(&self, params: LocalityCreate) -> Result<LocalityId, LocalityError> {
        debug!("Sending request");
        self.localities.create(params).await.map_err(Self::map_error)
    }

    pub async fn find(&self, name: &str, city: &str) -> Result<Option<Locality>, LocalityError> {
        let query = LocalityQuery::NameAndCity {
            name: name.to_string(),
            city: city.to_string(),
        };
        Ok(self.list(query).await?.into_iter().next())
    }

    /// All localities, safest first.
    pub async fn list_all(&self) -> Result<Vec<Locality>, LocalityError> {
        self.list(LocalityQuery::All).await.map(safest_first)
    }

    pub async fn list_by_city(&self, city: &str) -> Result<Vec<Locality>, LocalityError> {
        self.list(LocalityQuery::ByCity(city.to_string()))
            .await
            .map(safest_first)
    }

    pub async fn list_verified(&self) -> Result<Vec<Locality>, LocalityError> {
        self.list(LocalityQuery::Verified).await.map(safest_first)
    }

    pub async fn search(&self, text: &str) -> Result<Vec<Locality>, LocalityError> {
        self.list(LocalityQuery::Search(text.to_string()))
            .await
            .map(safest_first)
    }

    /// Stores a review and recomputes the locality's aggregates from all of its reviews.
    ///
    /// Returns the locality as it stands after the recompute.
    #[instrument(skip(self, params), fields(locality = %params.locality_id, user = %params.user_id))]
    pub async fn add_review(&self, params: LocalityReviewCreate) -> Result<Locality, LocalityError> {
        let locality_id = params.locality_id.clone();
        if self.get(locality_id.clone()).await?.is_none() {
            return Err(LocalityError::NotFound(locality_id.to_string()));
        }

        let review_id: LocalityReviewId = self.reviews.create(params).await.map_err(Self::map_error)?;
        debug!(%review_id, "Review stored");

        let stats = self
            .localities
            .perform_action(locality_id.clone(), LocalityAction::RefreshStats)
            .await
            .map_err(Self::map_error)?;
        info!(
            review_count = stats.review_count,
            is_verified = stats.is_verified,
            "Locality stats refreshed"
        );

        self.get(locality_id.clone())
            .await?
            .ok_or_else(|| LocalityError::NotFound(locality_id.to_string()))
    }

    /// Reviews for a locality, newest first.
    pub async fn reviews_for(&self, locality: LocalityId) -> Result<Vec<LocalityReview>, LocalityError> {
        let mut reviews = self
            .reviews
            .list(LocalityReviewQuery::ForLocality(locality))
            .await
            .map_err(Self::map_error)?;
        reviews.sort_by(|a, b| b.review_date.cmp(&a.review_date));
        Ok(reviews)
    }
}

#[async_trait]
impl ActorClient<Locality> for LocalityClient {
    type Error = LocalityError;

    fn inner(&self) -> &ResourceClient<Locality> {
        &self.localities
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<LocalityError>() {
            Ok(typed) => typed,
            Err(FrameworkError::NotFound(id)) => LocalityError::NotFound(id),
            Err(other) => LocalityError::ActorCommunicationError(other.to_string()),
        }
    }
}
