//! [`ActorEntity`] implementation for [`Property`].

use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use super::actions::{PropertyAction, PropertyActionResult};
use super::error::PropertyError;
use crate::model::{Property, PropertyCreate, PropertyId, PropertyQuery, PropertyUpdate};

fn validate_price(price: Decimal) -> Result<(), PropertyError> {
    if price.is_sign_negative() {
        return Err(PropertyError::ValidationError(format!(
            "price must not be negative, got {price}"
        )));
    }
    Ok(())
}

fn validate_area(area: Decimal) -> Result<(), PropertyError> {
    if area <= Decimal::ZERO {
        return Err(PropertyError::ValidationError(format!(
            "area must be positive, got {area}"
        )));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Property {
    type Id = PropertyId;
    type Create = PropertyCreate;
    type Update = PropertyUpdate;
    type Action = PropertyAction;
    type ActionResult = PropertyActionResult;
    type Query = PropertyQuery;
    type Context = ();
    type Error = PropertyError;

    fn from_create_params(id: PropertyId, params: PropertyCreate) -> Result<Self, Self::Error> {
        let property = Self {
            id,
            title: params.title,
            description: params.description,
            price: params.price,
            address: params.address,
            city: params.city,
            zip_code: params.zip_code,
            country: params.country,
            bedrooms: params.bedrooms,
            bathrooms: params.bathrooms,
            area: params.area,
            image_url: params.image_url,
            seller_id: params.seller_id,
            is_sold: false,
            date_posted: Utc::now(),
            locality_id: params.locality_id,
        };
        property.validate()?;
        Ok(property)
    }

    fn id(&self) -> &PropertyId {
        &self.id
    }

    fn validate(&self) -> Result<(), Self::Error> {
        if self.title.trim().is_empty() {
            return Err(PropertyError::ValidationError("title is required".into()));
        }
        if self.seller_id.is_empty() {
            return Err(PropertyError::ValidationError("seller is required".into()));
        }
        validate_price(self.price)?;
        validate_area(self.area)
    }

    fn matches(&self, query: &PropertyQuery) -> bool {
        match query {
            PropertyQuery::All => true,
            PropertyQuery::Available => !self.is_sold,
            PropertyQuery::BySeller(seller) => &self.seller_id == seller,
            PropertyQuery::Search(text) => self.mentions(text),
            PropertyQuery::Filter(filter) => {
                !self.is_sold
                    && filter.min_price.map_or(true, |min| self.price >= min)
                    && filter.max_price.map_or(true, |max| self.price <= max)
                    && filter.min_bedrooms.map_or(true, |n| self.bedrooms >= n)
                    && filter.min_bathrooms.map_or(true, |n| self.bathrooms >= n)
            }
        }
    }

    /// Applies seller edits. Everything is validated before the first field is written, so a
    /// rejected update leaves the listing untouched.
    async fn on_update(&mut self, update: PropertyUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if update.requested_by != self.seller_id {
            return Err(PropertyError::NotOwner {
                property: self.id.clone(),
                user: update.requested_by,
            });
        }
        if let Some(price) = update.price {
            validate_price(price)?;
        }
        if let Some(area) = update.area {
            validate_area(area)?;
        }
        if matches!(&update.title, Some(t) if t.trim().is_empty()) {
            return Err(PropertyError::ValidationError("title is required".into()));
        }

        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(bedrooms) = update.bedrooms {
            self.bedrooms = bedrooms;
        }
        if let Some(bathrooms) = update.bathrooms {
            self.bathrooms = bathrooms;
        }
        if let Some(area) = update.area {
            self.area = area;
        }
        if let Some(image_url) = update.image_url {
            self.image_url = Some(image_url);
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: PropertyAction,
        _ctx: &(),
    ) -> Result<PropertyActionResult, Self::Error> {
        match action {
            PropertyAction::MarkSold => {
                let flipped = !self.is_sold;
                self.is_sold = true;
                Ok(PropertyActionResult::MarkSold(flipped))
            }
            PropertyAction::MarkAvailable => {
                let flipped = self.is_sold;
                self.is_sold = false;
                Ok(PropertyActionResult::MarkAvailable(flipped))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PropertyFilter, UserId};

    fn listing(seller: &str, price: i64, bedrooms: u32) -> PropertyCreate {
        PropertyCreate {
            title: "Garden flat".into(),
            description: "Quiet street".into(),
            price: Decimal::from(price),
            address: "12 Elm Road".into(),
            city: "Pune".into(),
            zip_code: "411001".into(),
            country: "IN".into(),
            bedrooms,
            bathrooms: 1,
            area: Decimal::from(850),
            image_url: None,
            seller_id: UserId::from(seller),
            locality_id: None,
        }
    }

    #[test]
    fn test_create_rejects_bad_numbers() {
        let mut params = listing("s1", 100, 2);
        params.area = Decimal::ZERO;
        assert!(matches!(
            Property::from_create_params(PropertyId::generate(), params),
            Err(PropertyError::ValidationError(_))
        ));

        let params = listing("s1", -5, 2);
        assert!(Property::from_create_params(PropertyId::generate(), params).is_err());
    }

    #[test]
    fn test_filter_and_search() {
        let p = Property::from_create_params(PropertyId::generate(), listing("s1", 300, 3)).unwrap();
        let filter = PropertyFilter {
            min_price: Some(Decimal::from(200)),
            max_price: Some(Decimal::from(400)),
            min_bedrooms: Some(3),
            min_bathrooms: None,
        };
        assert!(p.matches(&PropertyQuery::Filter(filter.clone())));
        assert!(p.matches(&PropertyQuery::Search("elm".into())));
        assert!(p.matches(&PropertyQuery::Search("PUNE".into())));
        assert!(!p.matches(&PropertyQuery::Search("Mumbai".into())));

        let mut sold = p.clone();
        sold.is_sold = true;
        assert!(!sold.matches(&PropertyQuery::Filter(filter)));
        assert!(!sold.matches(&PropertyQuery::Available));
    }

    #[tokio::test]
    async fn test_mark_sold_flips_once() {
        let mut p = Property::from_create_params(PropertyId::generate(), listing("s1", 100, 1)).unwrap();
        let first = p.handle_action(PropertyAction::MarkSold, &()).await.unwrap();
        let second = p.handle_action(PropertyAction::MarkSold, &()).await.unwrap();
        assert_eq!(first, PropertyActionResult::MarkSold(true));
        assert_eq!(second, PropertyActionResult::MarkSold(false));
        assert!(p.is_sold);
    }

    #[tokio::test]
    async fn test_update_requires_owner_and_leaves_sold_flag() {
        let mut p = Property::from_create_params(PropertyId::generate(), listing("s1", 100, 1)).unwrap();

        let mut by_stranger = PropertyUpdate::by(UserId::from("b1"));
        by_stranger.price = Some(Decimal::from(1));
        assert!(matches!(
            p.on_update(by_stranger, &()).await,
            Err(PropertyError::NotOwner { .. })
        ));
        assert_eq!(p.price, Decimal::from(100));

        let mut by_seller = PropertyUpdate::by(UserId::from("s1"));
        by_seller.price = Some(Decimal::from(90));
        by_seller.area = Some(Decimal::ZERO);
        assert!(p.on_update(by_seller, &()).await.is_err());
        assert_eq!(p.price, Decimal::from(100));

        let mut by_seller = PropertyUpdate::by(UserId::from("s1"));
        by_seller.price = Some(Decimal::from(90));
        p.on_update(by_seller, &()).await.unwrap();
        assert_eq!(p.price, Decimal::from(90));
        assert!(!p.is_sold);
    }
}
