//! [`ActorEntity`] implementation for [`ServiceBooking`].
//!
//! A booking can only be created against a service that exists and is available. The check
//! runs in `on_create`, against the service store held in context.

use actor_framework::{ActorEntity, ResourceClient};
use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use super::actions::BookingAction;
use super::error::ServiceError;
use crate::model::{
    BookingStatus, Service, ServiceBooking, ServiceBookingCreate, ServiceBookingId,
    ServiceBookingQuery,
};

#[async_trait]
impl ActorEntity for ServiceBooking {
    type Id = ServiceBookingId;
    type Create = ServiceBookingCreate;
    type Update = ();
    type Action = BookingAction;
    type ActionResult = BookingStatus;
    type Query = ServiceBookingQuery;
    type Context = ResourceClient<Service>;
    type Error = ServiceError;

    fn from_create_params(id: ServiceBookingId, params: ServiceBookingCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            service_id: params.service_id,
            user_id: params.user_id,
            booking_date: Utc::now(),
            scheduled_date: params.scheduled_date,
            status: BookingStatus::Pending,
            notes: params.notes,
        })
    }

    fn id(&self) -> &ServiceBookingId {
        &self.id
    }

    fn matches(&self, query: &ServiceBookingQuery) -> bool {
        match query {
            ServiceBookingQuery::ForUser(user) => &self.user_id == user,
            ServiceBookingQuery::ForService(service) => &self.service_id == service,
        }
    }

    async fn on_create(&mut self, services: &ResourceClient<Service>) -> Result<(), Self::Error> {
        debug!(service_id = %self.service_id, "Checking service before booking");
        let service = services
            .get(self.service_id.clone())
            .await
            .map_err(|e| ServiceError::ActorCommunicationError(e.to_string()))?
            .ok_or_else(|| ServiceError::NotFound(self.service_id.to_string()))?;
        if !service.is_available {
            return Err(ServiceError::Unavailable(service.id.to_string()));
        }
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _ctx: &ResourceClient<Service>) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: BookingAction,
        _ctx: &ResourceClient<Service>,
    ) -> Result<BookingStatus, Self::Error> {
        match action {
            BookingAction::SetStatus(next) => {
                if !self.status.can_become(next) {
                    return Err(ServiceError::InvalidBookingTransition {
                        from: self.status,
                        to: next,
                    });
                }
                Ok(std::mem::replace(&mut self.status, next))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ServiceId, UserId};
    use actor_framework::mock::MockClient;

    fn booking() -> ServiceBooking {
        ServiceBooking::from_create_params(
            ServiceBookingId::from("b1"),
            ServiceBookingCreate {
                service_id: ServiceId::from("s1"),
                user_id: UserId::from("u1"),
                scheduled_date: Utc::now(),
                notes: String::new(),
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_booking_unknown_service_fails() {
        let mut services = MockClient::<Service>::new();
        services.expect_get(ServiceId::from("s1")).return_ok(None);

        let mut b = booking();
        let err = b.on_create(&services.client()).await.unwrap_err();
        assert_eq!(err, ServiceError::NotFound("s1".into()));
        services.verify();
    }

    #[tokio::test]
    async fn test_cancelled_booking_cannot_be_confirmed() {
        let services = actor_framework::mock::unreachable_client::<Service>();
        let mut b = booking();
        let previous = b
            .handle_action(BookingAction::SetStatus(BookingStatus::Cancelled), &services)
            .await
            .unwrap();
        assert_eq!(previous, BookingStatus::Pending);

        let err = b
            .handle_action(BookingAction::SetStatus(BookingStatus::Confirmed), &services)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidBookingTransition { .. }));
    }
}
