//! Neighbourhoods and the reviews residents leave for them.
//!
//! A locality's three ratings, review count and verified flag are derived from its reviews by
//! [`rating::recompute`](crate::rating::recompute); they are never edited directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{LocalityId, LocalityReviewId, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Locality {
    pub id: LocalityId,
    pub name: String,
    pub city: String,
    pub state: String,
    pub safety_rating: f64,
    pub transport_rating: f64,
    pub schools_rating: f64,
    pub review_count: u32,
    pub is_verified: bool,
    pub date_added: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct LocalityCreate {
    pub name: String,
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone, Default)]
pub struct LocalityUpdate {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LocalityQuery {
    All,
    ByCity(String),
    Verified,
    /// Case-insensitive match on name or city.
    Search(String),
    /// Exact, case-insensitive name and city.
    NameAndCity { name: String, city: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalityReview {
    pub id: LocalityReviewId,
    pub locality_id: LocalityId,
    pub user_id: UserId,
    pub safety_rating: f64,
    pub transport_rating: f64,
    pub schools_rating: f64,
    pub comment: String,
    pub review_date: DateTime<Utc>,
}

impl LocalityReview {
    pub fn ratings(&self) -> [f64; 3] {
        [self.safety_rating, self.transport_rating, self.schools_rating]
    }
}

/// Ratings outside 0..=5 are clamped when the review is stored.
#[derive(Debug, Clone)]
pub struct LocalityReviewCreate {
    pub locality_id: LocalityId,
    pub user_id: UserId,
    pub safety_rating: f64,
    pub transport_rating: f64,
    pub schools_rating: f64,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LocalityReviewQuery {
    ForLocality(LocalityId),
    ByUser(UserId),
}
