use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use crate::model::{
    BookingStatus, Service, ServiceBooking, ServiceBookingCreate, ServiceBookingId,
    ServiceBookingQuery, ServiceCategory, ServiceCreate, ServiceId, ServiceQuery, ServiceReview,
    ServiceReviewCreate, ServiceReviewQuery, ServiceUpdate, UserId,
};
use crate::service_actor::{BookingAction, ServiceAction, ServiceError};

/// Client for home services, their reviews and bookings.
#[derive(Clone)]
pub struct ServiceClient {
    services: ResourceClient<Service>,
    reviews: ResourceClient<ServiceReview>,
    bookings: ResourceClient<ServiceBooking>,
}

fn best_rated_first(mut services: Vec<Service>) -> Vec<Service> {
    services.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    services
}

impl ServiceClient {
    pub fn new(
        services: ResourceClient<Service>,
        reviews: ResourceClient<ServiceReview>,
        bookings: ResourceClient<ServiceBooking>,
    ) -> Self {
        Self {
            services,
            reviews,
            bookings,
        }
    }

    #[instrument(skip(self, params), fields(name = %params.name, category = %params.category))]
    pub async fn create_service(&self, params: ServiceCreate) -> Result<ServiceId, ServiceError> {
        debug!("Sending request");
        self.services.create(params).await.map_err(Self::map_error)
    }

    pub async fn update_service(&self, id: ServiceId, update: ServiceUpdate) -> Result<Service, ServiceError> {
        self.services.update(id, update).await.map_err(Self::map_error)
    }

    /// Available services, best rated first.
    pub async fn list_available(&self) -> Result<Vec<Service>, ServiceError> {
        self.list(ServiceQuery::Available).await.map(best_rated_first)
    }

    pub async fn list_by_category(&self, category: ServiceCategory) -> Result<Vec<Service>, ServiceError> {
        self.list(ServiceQuery::ByCategory(category))
            .await
            .map(best_rated_first)
    }

    pub async fn search(&self, text: &str) -> Result<Vec<Service>, ServiceError> {
        self.list(ServiceQuery::Search(text.to_string()))
            .await
            .map(best_rated_first)
    }

    /// Stores a review and recomputes the service's rating. Returns the updated service.
    #[instrument(skip(self, params), fields(service = %params.service_id))]
    pub async fn add_review(&self, params: ServiceReviewCreate) -> Result<Service, ServiceError> {
        let service_id = params.service_id.clone();
        if self.get(service_id.clone()).await?.is_none() {
            return Err(ServiceError::NotFound(service_id.to_string()));
        }
        self.reviews.create(params).await.map_err(Self::map_error)?;
        let stats = self
            .services
            .perform_action(service_id.clone(), ServiceAction::RefreshRating)
            .await
            .map_err(Self::map_error)?;
        info!(rating = stats.averages[0], review_count = stats.review_count, "Service rating refreshed");

        self.get(service_id.clone())
            .await?
            .ok_or_else(|| ServiceError::NotFound(service_id.to_string()))
    }

    /// Reviews for a service, newest first.
    pub async fn reviews_for(&self, service: ServiceId) -> Result<Vec<ServiceReview>, ServiceError> {
        let mut reviews = self
            .reviews
            .list(ServiceReviewQuery::ForService(service))
            .await
            .map_err(Self::map_error)?;
        reviews.sort_by(|a, b| b.review_date.cmp(&a.review_date));
        Ok(reviews)
    }

    /// Books an available service. The booking starts out `Pending`.
    #[instrument(skip(self, notes))]
    pub async fn book(
        &self,
        service: ServiceId,
        user: UserId,
        scheduled_date: DateTime<Utc>,
        notes: String,
    ) -> Result<ServiceBookingId, ServiceError> {
        debug!("Sending request");
        let id = self
            .bookings
            .create(ServiceBookingCreate {
                service_id: service,
                user_id: user,
                scheduled_date,
                notes,
            })
            .await
            .map_err(Self::map_error)?;
        info!(%id, "Booking created");
        Ok(id)
    }

    /// Moves a booking to `status`. Returns the previous status.
    #[instrument(skip(self))]
    pub async fn set_booking_status(
        &self,
        id: ServiceBookingId,
        status: BookingStatus,
    ) -> Result<BookingStatus, ServiceError> {
        self.bookings
            .perform_action(id, BookingAction::SetStatus(status))
            .await
            .map_err(Self::map_error)
    }

    pub async fn cancel_booking(&self, id: ServiceBookingId) -> Result<BookingStatus, ServiceError> {
        self.set_booking_status(id, BookingStatus::Cancelled).await
    }

    /// A user's bookings, most recently made first.
    pub async fn bookings_for_user(&self, user: UserId) -> Result<Vec<ServiceBooking>, ServiceError> {
        let mut bookings = self
            .bookings
            .list(ServiceBookingQuery::ForUser(user))
            .await
            .map_err(Self::map_error)?;
        bookings.sort_by(|a, b| b.booking_date.cmp(&a.booking_date));
        Ok(bookings)
    }
}

#[async_trait]
impl ActorClient<Service> for ServiceClient {
    type Error = ServiceError;

    fn inner(&self) -> &ResourceClient<Service> {
        &self.services
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<ServiceError>() {
            Ok(typed) => typed,
            Err(FrameworkError::NotFound(id)) => ServiceError::NotFound(id),
            Err(other) => ServiceError::ActorCommunicationError(other.to_string()),
        }
    }
}
