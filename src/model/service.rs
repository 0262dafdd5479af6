//! Home services offered alongside listings: movers, cleaners, legal help and the like.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

use super::{ServiceBookingId, ServiceId, ServiceReviewId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceCategory {
    PackersMovers,
    Cleaning,
    LegalHelp,
    Painting,
    Plumbing,
    Electrical,
    Carpentry,
    PestControl,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 8] = [
        ServiceCategory::PackersMovers,
        ServiceCategory::Cleaning,
        ServiceCategory::LegalHelp,
        ServiceCategory::Painting,
        ServiceCategory::Plumbing,
        ServiceCategory::Electrical,
        ServiceCategory::Carpentry,
        ServiceCategory::PestControl,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            ServiceCategory::PackersMovers => "Packers & Movers",
            ServiceCategory::Cleaning => "Cleaning Services",
            ServiceCategory::LegalHelp => "Legal Help",
            ServiceCategory::Painting => "Painting",
            ServiceCategory::Plumbing => "Plumbing",
            ServiceCategory::Electrical => "Electrical",
            ServiceCategory::Carpentry => "Carpentry",
            ServiceCategory::PestControl => "Pest Control",
        }
    }
}

impl Display for ServiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ServiceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accepts "PACKERS_MOVERS", "packers-movers", "PackersMovers".
        let wanted: String = s
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect::<String>()
            .to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|c| format!("{c:?}").to_ascii_uppercase() == wanted)
            .ok_or_else(|| format!("unknown service category: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    pub category: ServiceCategory,
    pub description: String,
    pub price: Decimal,
    /// Average of all review ratings, 0 when there are none.
    pub rating: f64,
    pub review_count: u32,
    pub provider_name: String,
    pub provider_phone: String,
    pub provider_email: String,
    pub image_url: Option<String>,
    pub is_available: bool,
    pub date_added: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ServiceCreate {
    pub name: String,
    pub category: ServiceCategory,
    pub description: String,
    pub price: Decimal,
    pub provider_name: String,
    pub provider_phone: String,
    pub provider_email: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ServiceUpdate {
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub is_available: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ServiceQuery {
    Available,
    ByCategory(ServiceCategory),
    /// Case-insensitive match on name or description.
    Search(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceReview {
    pub id: ServiceReviewId,
    pub service_id: ServiceId,
    pub user_id: UserId,
    pub rating: f64,
    pub comment: String,
    pub review_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ServiceReviewCreate {
    pub service_id: ServiceId,
    pub user_id: UserId,
    pub rating: f64,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ServiceReviewQuery {
    ForService(ServiceId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn can_become(self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, Completed)
                | (Confirmed, Cancelled)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceBooking {
    pub id: ServiceBookingId,
    pub service_id: ServiceId,
    pub user_id: UserId,
    pub booking_date: DateTime<Utc>,
    pub scheduled_date: DateTime<Utc>,
    pub status: BookingStatus,
    pub notes: String,
}

#[derive(Debug, Clone)]
pub struct ServiceBookingCreate {
    pub service_id: ServiceId,
    pub user_id: UserId,
    pub scheduled_date: DateTime<Utc>,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ServiceBookingQuery {
    ForUser(UserId),
    ForService(ServiceId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parsing() {
        assert_eq!(
            "PACKERS_MOVERS".parse::<ServiceCategory>().unwrap(),
            ServiceCategory::PackersMovers
        );
        assert_eq!(
            "pest-control".parse::<ServiceCategory>().unwrap(),
            ServiceCategory::PestControl
        );
        assert!("gardening".parse::<ServiceCategory>().is_err());
    }

    #[test]
    fn test_booking_transitions() {
        assert!(BookingStatus::Pending.can_become(BookingStatus::Cancelled));
        assert!(BookingStatus::Confirmed.can_become(BookingStatus::Completed));
        assert!(!BookingStatus::Cancelled.can_become(BookingStatus::Pending));
        assert!(!BookingStatus::Completed.can_become(BookingStatus::Cancelled));
    }
}
