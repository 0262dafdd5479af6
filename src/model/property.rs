//! Listed properties.
//!
//! # Actor Framework
//! Implements [`ActorEntity`](actor_framework::ActorEntity) in
//! [`property_actor::entity`](crate::property_actor::entity). Listing fields are edited only by
//! the seller; `is_sold` is changed only by the purchase workflow through
//! [`PropertyAction`](crate::property_actor::PropertyAction).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{LocalityId, PropertyId, UserId};

/// A listed property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub country: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub area: Decimal,
    pub image_url: Option<String>,
    pub seller_id: UserId,
    pub is_sold: bool,
    pub date_posted: DateTime<Utc>,
    pub locality_id: Option<LocalityId>,
}

impl Property {
    /// Case-insensitive substring match over city, address and title.
    pub fn mentions(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        [&self.city, &self.address, &self.title]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Payload for a new listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyCreate {
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub country: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub area: Decimal,
    pub image_url: Option<String>,
    pub seller_id: UserId,
    pub locality_id: Option<LocalityId>,
}

/// Seller edits to a listing. `requested_by` must be the seller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyUpdate {
    pub requested_by: UserId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub area: Option<Decimal>,
    pub image_url: Option<String>,
}

impl PropertyUpdate {
    pub fn by(requested_by: UserId) -> Self {
        Self {
            requested_by,
            title: None,
            description: None,
            price: None,
            bedrooms: None,
            bathrooms: None,
            area: None,
            image_url: None,
        }
    }
}

/// Numeric listing filter. Unset bounds are ignored; sold listings never match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyFilter {
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_bedrooms: Option<u32>,
    pub min_bathrooms: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyQuery {
    All,
    Available,
    BySeller(UserId),
    Search(String),
    Filter(PropertyFilter),
}
