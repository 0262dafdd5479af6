use actor_framework::ActorClient;
use chrono::{Duration, Utc};
use property_market::clients::{LocalityClient, ServiceClient};
use property_market::locality_actor::{self, LocalityContext, LocalityError};
use property_market::model::{
    BookingStatus, LocalityCreate, LocalityId, LocalityReviewCreate, ServiceCategory, ServiceCreate,
    ServiceId, ServiceReviewCreate, ServiceUpdate, UserId,
};
use property_market::service_actor::{self, ServiceError};
use rust_decimal::Decimal;

fn localities(threshold: u32) -> LocalityClient {
    let (review_actor, reviews) = locality_actor::new_reviews(32);
    let (actor, localities) = locality_actor::new(32);
    tokio::spawn(review_actor.run(()));
    tokio::spawn(actor.run(LocalityContext {
        reviews: reviews.clone(),
        verified_threshold: threshold,
    }));
    LocalityClient::new(localities, reviews)
}

fn services() -> ServiceClient {
    let (review_actor, reviews) = service_actor::new_reviews(32);
    let (actor, services) = service_actor::new(32);
    let (booking_actor, bookings) = service_actor::new_bookings(32);
    tokio::spawn(review_actor.run(()));
    tokio::spawn(actor.run(reviews.clone()));
    tokio::spawn(booking_actor.run(services.clone()));
    ServiceClient::new(services, reviews, bookings)
}

fn review(locality: &LocalityId, user: usize, ratings: [f64; 3]) -> LocalityReviewCreate {
    LocalityReviewCreate {
        locality_id: locality.clone(),
        user_id: UserId::from(format!("user-{user}")),
        safety_rating: ratings[0],
        transport_rating: ratings[1],
        schools_rating: ratings[2],
        comment: String::new(),
    }
}

fn cleaners() -> ServiceCreate {
    ServiceCreate {
        name: "Sparkle Home Cleaning".to_string(),
        category: ServiceCategory::Cleaning,
        description: "Deep cleaning before move-in".to_string(),
        price: Decimal::new(1500, 0),
        provider_name: "Sparkle".to_string(),
        provider_phone: "555-0142".to_string(),
        provider_email: "hello@sparkle.test".to_string(),
        image_url: None,
    }
}

#[tokio::test]
async fn test_locality_aggregates_follow_reviews() {
    let client = localities(10);
    let id = client
        .create_locality(LocalityCreate {
            name: "Baner".to_string(),
            city: "Pune".to_string(),
            state: "MH".to_string(),
        })
        .await
        .unwrap();

    client.add_review(review(&id, 1, [4.0, 3.0, 5.0])).await.unwrap();
    let locality = client.add_review(review(&id, 2, [2.0, 5.0, 3.0])).await.unwrap();

    assert_eq!(locality.review_count, 2);
    assert_eq!(locality.safety_rating, 3.0);
    assert_eq!(locality.transport_rating, 4.0);
    assert_eq!(locality.schools_rating, 4.0);
    assert!(!locality.is_verified);
    assert_eq!(client.reviews_for(id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_locality_verified_at_threshold() {
    let client = localities(10);
    let id = client
        .create_locality(LocalityCreate {
            name: "Aundh".to_string(),
            city: "Pune".to_string(),
            state: "MH".to_string(),
        })
        .await
        .unwrap();

    for user in 0..9 {
        let locality = client.add_review(review(&id, user, [4.0, 4.0, 4.0])).await.unwrap();
        assert!(!locality.is_verified);
    }
    let locality = client.add_review(review(&id, 9, [4.0, 4.0, 4.0])).await.unwrap();

    assert!(locality.is_verified);
    assert_eq!(locality.review_count, 10);
    assert_eq!(client.list_verified().await.unwrap().len(), 1);
}

/// Reviews posted at the same time are all counted.
#[tokio::test]
async fn test_concurrent_reviews_are_all_counted() {
    let client = localities(10);
    let id = client
        .create_locality(LocalityCreate {
            name: "Wakad".to_string(),
            city: "Pune".to_string(),
            state: "MH".to_string(),
        })
        .await
        .unwrap();

    let mut handles = Vec::new();
    for user in 0..12 {
        let client = client.clone();
        let id = id.clone();
        handles.push(tokio::spawn(async move {
            client.add_review(review(&id, user, [5.0, 5.0, 5.0])).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let locality = client.get(id).await.unwrap().unwrap();
    assert_eq!(locality.review_count, 12);
    assert!(locality.is_verified);
}

#[tokio::test]
async fn test_out_of_range_ratings_are_clamped() {
    let client = localities(10);
    let id = client
        .create_locality(LocalityCreate {
            name: "Kothrud".to_string(),
            city: "Pune".to_string(),
            state: "MH".to_string(),
        })
        .await
        .unwrap();

    let locality = client.add_review(review(&id, 1, [9.0, -3.0, 2.5])).await.unwrap();

    assert_eq!(locality.safety_rating, 5.0);
    assert_eq!(locality.transport_rating, 0.0);
    assert_eq!(locality.schools_rating, 2.5);
}

#[tokio::test]
async fn test_locality_lookups() {
    let client = localities(10);
    let params = |name: &str, city: &str| LocalityCreate {
        name: name.to_string(),
        city: city.to_string(),
        state: String::new(),
    };
    client.create_locality(params("Baner", "Pune")).await.unwrap();
    client.create_locality(params("Bandra", "Mumbai")).await.unwrap();

    assert!(client.find("baner", "PUNE").await.unwrap().is_some());
    assert_eq!(client.list_by_city("Mumbai").await.unwrap().len(), 1);
    assert_eq!(client.search("ban").await.unwrap().len(), 2);
    assert_eq!(client.list_all().await.unwrap().len(), 2);

    let duplicate = client.create_locality(params("BANER", "pune")).await;
    assert!(matches!(duplicate, Err(LocalityError::AlreadyExists { .. })));
}

#[tokio::test]
async fn test_concurrent_duplicate_localities_create_one() {
    let client = localities(10);

    let mut handles = Vec::new();
    for name in ["Hinjewadi", "HINJEWADI", "hinjewadi", "Hinjewadi"] {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client
                .create_locality(LocalityCreate {
                    name: name.to_string(),
                    city: "Pune".to_string(),
                    state: "MH".to_string(),
                })
                .await
        }));
    }
    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(e) => assert!(matches!(e, LocalityError::AlreadyExists { .. })),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(client.list_by_city("pune").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_review_for_unknown_locality() {
    let client = localities(10);
    let missing = LocalityId::from("nowhere");

    let result = client.add_review(review(&missing, 1, [3.0, 3.0, 3.0])).await;

    assert_eq!(result, Err(LocalityError::NotFound("nowhere".to_string())));
    assert!(client.reviews_for(missing).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_service_rating_and_listing_order() {
    let client = services();
    let good = client.create_service(cleaners()).await.unwrap();
    let mut other = cleaners();
    other.name = "Budget Cleaners".to_string();
    let budget = client.create_service(other).await.unwrap();

    for rating in [5.0, 4.0] {
        client
            .add_review(ServiceReviewCreate {
                service_id: good.clone(),
                user_id: UserId::from("u1"),
                rating,
                comment: String::new(),
            })
            .await
            .unwrap();
    }
    let rated = client
        .add_review(ServiceReviewCreate {
            service_id: budget.clone(),
            user_id: UserId::from("u2"),
            rating: 2.0,
            comment: "late".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(rated.rating, 2.0);
    assert_eq!(rated.review_count, 1);

    let listed = client.list_by_category(ServiceCategory::Cleaning).await.unwrap();
    let order: Vec<ServiceId> = listed.into_iter().map(|s| s.id).collect();
    assert_eq!(order, vec![good.clone(), budget]);

    let top = client.get(good.clone()).await.unwrap().unwrap();
    assert_eq!(top.rating, 4.5);
    assert_eq!(client.reviews_for(good).await.unwrap().len(), 2);
    assert!(client.list_by_category(ServiceCategory::Plumbing).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_booking_lifecycle() {
    let client = services();
    let service = client.create_service(cleaners()).await.unwrap();
    let user = UserId::from("u1");

    let booking = client
        .book(service.clone(), user.clone(), Utc::now() + Duration::days(3), "2BHK".to_string())
        .await
        .unwrap();
    let bookings = client.bookings_for_user(user.clone()).await.unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].status, BookingStatus::Pending);

    assert_eq!(
        client.set_booking_status(booking.clone(), BookingStatus::Confirmed).await,
        Ok(BookingStatus::Pending)
    );
    assert_eq!(client.cancel_booking(booking.clone()).await, Ok(BookingStatus::Confirmed));
    assert!(matches!(
        client.cancel_booking(booking).await,
        Err(ServiceError::InvalidBookingTransition { .. })
    ));
}

#[tokio::test]
async fn test_unavailable_service_cannot_be_booked() {
    let client = services();
    let service = client.create_service(cleaners()).await.unwrap();
    client
        .update_service(
            service.clone(),
            ServiceUpdate {
                is_available: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let result = client
        .book(service.clone(), UserId::from("u1"), Utc::now(), String::new())
        .await;

    assert_eq!(result, Err(ServiceError::Unavailable(service.to_string())));
    assert!(client.list_available().await.unwrap().is_empty());
    assert!(client.bookings_for_user(UserId::from("u1")).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_booking_unknown_service() {
    let client = services();

    let result = client
        .book(ServiceId::from("nope"), UserId::from("u1"), Utc::now(), String::new())
        .await;

    assert_eq!(result, Err(ServiceError::NotFound("nope".to_string())));
}
