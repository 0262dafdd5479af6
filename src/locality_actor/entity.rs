//! [`ActorEntity`] implementations for [`Locality`] and [`LocalityReview`].
//!
//! The locality store holds a client of the review store in its context. Refreshing a
//! locality's aggregates runs inside the locality actor, so concurrent refreshes for the same
//! locality are applied one at a time and each reads every review stored before it started.

use actor_framework::{ActorEntity, ResourceClient};
use async_trait::async_trait;
use chrono::Utc;

use super::error::LocalityError;
use crate::model::{
    Locality, LocalityCreate, LocalityId, LocalityQuery, LocalityReview, LocalityReviewCreate,
    LocalityReviewId, LocalityReviewQuery, LocalityUpdate,
};
use crate::rating::{clamp_rating, recompute, AggregateStats};

/// Dependencies of the locality store.
#[derive(Clone)]
pub struct LocalityContext {
    pub reviews: ResourceClient<LocalityReview>,
    pub verified_threshold: u32,
}

#[derive(Debug, Clone)]
pub enum LocalityAction {
    /// Rebuild ratings, review count and verified flag from the stored reviews.
    RefreshStats,
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[async_trait]
impl ActorEntity for Locality {
    type Id = LocalityId;
    type Create = LocalityCreate;
    type Update = LocalityUpdate;
    type Action = LocalityAction;
    type ActionResult = AggregateStats<3>;
    type Query = LocalityQuery;
    type Context = LocalityContext;
    type Error = LocalityError;

    fn from_create_params(id: LocalityId, params: LocalityCreate) -> Result<Self, Self::Error> {
        if params.name.trim().is_empty() || params.city.trim().is_empty() {
            return Err(LocalityError::ValidationError(
                "name and city are required".into(),
            ));
        }
        Ok(Self {
            id,
            name: params.name,
            city: params.city,
            state: params.state,
            safety_rating: 0.0,
            transport_rating: 0.0,
            schools_rating: 0.0,
            review_count: 0,
            is_verified: false,
            date_added: Utc::now(),
        })
    }

    fn id(&self) -> &LocalityId {
        &self.id
    }

    /// One locality per name and city, ignoring case.
    fn conflicts_with(&self, other: &Self) -> Option<Self::Error> {
        (eq_ignore_case(&self.name, &other.name) && eq_ignore_case(&self.city, &other.city)).then(|| {
            LocalityError::AlreadyExists {
                name: self.name.clone(),
                city: self.city.clone(),
            }
        })
    }

    fn matches(&self, query: &LocalityQuery) -> bool {
        match query {
            LocalityQuery::All => true,
            LocalityQuery::ByCity(city) => eq_ignore_case(&self.city, city),
            LocalityQuery::Verified => self.is_verified,
            LocalityQuery::Search(text) => {
                let text = text.to_lowercase();
                self.name.to_lowercase().contains(&text) || self.city.to_lowercase().contains(&text)
            }
            LocalityQuery::NameAndCity { name, city } => {
                eq_ignore_case(&self.name, name) && eq_ignore_case(&self.city, city)
            }
        }
    }

    async fn on_update(&mut self, update: LocalityUpdate, _ctx: &LocalityContext) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(city) = update.city {
            self.city = city;
        }
        if let Some(state) = update.state {
            self.state = state;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: LocalityAction,
        ctx: &LocalityContext,
    ) -> Result<AggregateStats<3>, Self::Error> {
        match action {
            LocalityAction::RefreshStats => {
                let reviews = ctx
                    .reviews
                    .list(LocalityReviewQuery::ForLocality(self.id.clone()))
                    .await
                    .map_err(|e| LocalityError::ActorCommunicationError(e.to_string()))?;
                let ratings: Vec<[f64; 3]> = reviews.iter().map(LocalityReview::ratings).collect();
                let stats = recompute(&ratings, ctx.verified_threshold);

                let [safety, transport, schools] = stats.averages;
                self.safety_rating = safety;
                self.transport_rating = transport;
                self.schools_rating = schools;
                self.review_count = stats.review_count;
                self.is_verified = stats.is_verified;
                Ok(stats)
            }
        }
    }
}

#[async_trait]
impl ActorEntity for LocalityReview {
    type Id = LocalityReviewId;
    type Create = LocalityReviewCreate;
    // Reviews are write-once.
    type Update = ();
    type Action = ();
    type ActionResult = ();
    type Query = LocalityReviewQuery;
    type Context = ();
    type Error = LocalityError;

    fn from_create_params(id: LocalityReviewId, params: LocalityReviewCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            locality_id: params.locality_id,
            user_id: params.user_id,
            safety_rating: clamp_rating(params.safety_rating),
            transport_rating: clamp_rating(params.transport_rating),
            schools_rating: clamp_rating(params.schools_rating),
            comment: params.comment,
            review_date: Utc::now(),
        })
    }

    fn id(&self) -> &LocalityReviewId {
        &self.id
    }

    fn matches(&self, query: &LocalityReviewQuery) -> bool {
        match query {
            LocalityReviewQuery::ForLocality(locality) => &self.locality_id == locality,
            LocalityReviewQuery::ByUser(user) => &self.user_id == user,
        }
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}
