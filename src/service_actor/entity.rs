//! [`ActorEntity`] implementations for [`Service`] and [`ServiceReview`].

use actor_framework::{ActorEntity, ResourceClient};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use super::actions::ServiceAction;
use super::error::ServiceError;
use crate::model::{
    Service, ServiceCreate, ServiceId, ServiceQuery, ServiceReview, ServiceReviewCreate,
    ServiceReviewId, ServiceReviewQuery, ServiceUpdate,
};
use crate::rating::{clamp_rating, recompute, AggregateStats};

fn validate_price(price: Decimal) -> Result<(), ServiceError> {
    if price.is_sign_negative() {
        return Err(ServiceError::ValidationError(format!(
            "price must not be negative, got {price}"
        )));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Service {
    type Id = ServiceId;
    type Create = ServiceCreate;
    type Update = ServiceUpdate;
    type Action = ServiceAction;
    type ActionResult = AggregateStats<1>;
    type Query = ServiceQuery;
    type Context = ResourceClient<ServiceReview>;
    type Error = ServiceError;

    fn from_create_params(id: ServiceId, params: ServiceCreate) -> Result<Self, Self::Error> {
        if params.name.trim().is_empty() {
            return Err(ServiceError::ValidationError("name is required".into()));
        }
        validate_price(params.price)?;
        Ok(Self {
            id,
            name: params.name,
            category: params.category,
            description: params.description,
            price: params.price,
            rating: 0.0,
            review_count: 0,
            provider_name: params.provider_name,
            provider_phone: params.provider_phone,
            provider_email: params.provider_email,
            image_url: params.image_url,
            is_available: true,
            date_added: Utc::now(),
        })
    }

    fn id(&self) -> &ServiceId {
        &self.id
    }

    fn matches(&self, query: &ServiceQuery) -> bool {
        match query {
            ServiceQuery::Available => self.is_available,
            ServiceQuery::ByCategory(category) => self.is_available && self.category == *category,
            ServiceQuery::Search(text) => {
                let text = text.to_lowercase();
                self.is_available
                    && (self.name.to_lowercase().contains(&text)
                        || self.description.to_lowercase().contains(&text))
            }
        }
    }

    async fn on_update(
        &mut self,
        update: ServiceUpdate,
        _ctx: &ResourceClient<ServiceReview>,
    ) -> Result<(), Self::Error> {
        if let Some(price) = update.price {
            validate_price(price)?;
            self.price = price;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(is_available) = update.is_available {
            self.is_available = is_available;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ServiceAction,
        reviews: &ResourceClient<ServiceReview>,
    ) -> Result<AggregateStats<1>, Self::Error> {
        match action {
            ServiceAction::RefreshRating => {
                let stored = reviews
                    .list(ServiceReviewQuery::ForService(self.id.clone()))
                    .await
                    .map_err(|e| ServiceError::ActorCommunicationError(e.to_string()))?;
                let ratings: Vec<[f64; 1]> = stored.iter().map(|r| [r.rating]).collect();
                // Services have no verified badge.
                let stats = recompute(&ratings, u32::MAX);
                self.rating = stats.averages[0];
                self.review_count = stats.review_count;
                Ok(stats)
            }
        }
    }
}

#[async_trait]
impl ActorEntity for ServiceReview {
    type Id = ServiceReviewId;
    type Create = ServiceReviewCreate;
    type Update = ();
    type Action = ();
    type ActionResult = ();
    type Query = ServiceReviewQuery;
    type Context = ();
    type Error = ServiceError;

    fn from_create_params(id: ServiceReviewId, params: ServiceReviewCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            service_id: params.service_id,
            user_id: params.user_id,
            rating: clamp_rating(params.rating),
            comment: params.comment,
            review_date: Utc::now(),
        })
    }

    fn id(&self) -> &ServiceReviewId {
        &self.id
    }

    fn matches(&self, query: &ServiceReviewQuery) -> bool {
        match query {
            ServiceReviewQuery::ForService(service) => &self.service_id == service,
        }
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ServiceCategory;

    fn movers() -> Service {
        Service::from_create_params(
            ServiceId::from("s1"),
            ServiceCreate {
                name: "Swift Movers".into(),
                category: ServiceCategory::PackersMovers,
                description: "Local and interstate moves".into(),
                price: Decimal::new(4999, 0),
                provider_name: "Swift".into(),
                provider_phone: "555-0100".into(),
                provider_email: "ops@swift.test".into(),
                image_url: None,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_unavailable_services_are_hidden_from_listings() {
        let mut service = movers();
        assert!(service.matches(&ServiceQuery::ByCategory(ServiceCategory::PackersMovers)));
        assert!(service.matches(&ServiceQuery::Search("interstate".into())));

        service.is_available = false;
        assert!(!service.matches(&ServiceQuery::Available));
        assert!(!service.matches(&ServiceQuery::Search("swift".into())));
    }

    #[tokio::test]
    async fn test_negative_price_update_is_rejected() {
        let mut service = movers();
        let reviews = actor_framework::mock::unreachable_client::<ServiceReview>();
        let err = service
            .on_update(
                ServiceUpdate {
                    price: Some(Decimal::new(-1, 0)),
                    is_available: Some(false),
                    ..Default::default()
                },
                &reviews,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::ValidationError(_)));
        assert!(service.is_available);
    }
}
