//! [`ActorEntity`] implementation for [`User`].

use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;

use super::error::UserError;
use crate::model::{User, UserCreate, UserId, UserQuery, UserUpdate};

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = UserUpdate;
    type Action = ();
    type ActionResult = ();
    type Query = UserQuery;
    type Context = ();
    type Error = UserError;

    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, Self::Error> {
        let user = Self {
            id,
            username: params.username,
            name: params.name,
            email: params.email,
            phone: params.phone,
            password_hash: params.password_hash,
            date_joined: Utc::now(),
        };
        user.validate()?;
        Ok(user)
    }

    fn id(&self) -> &UserId {
        &self.id
    }

    fn validate(&self) -> Result<(), Self::Error> {
        if self.username.trim().is_empty() {
            return Err(UserError::ValidationError("username is required".into()));
        }
        if self.password_hash.is_empty() {
            return Err(UserError::ValidationError("password hash is required".into()));
        }
        Ok(())
    }

    /// Usernames are unique within a store.
    fn conflicts_with(&self, other: &Self) -> Option<Self::Error> {
        (self.username == other.username).then(|| UserError::UsernameTaken(self.username.clone()))
    }

    fn matches(&self, query: &UserQuery) -> bool {
        match query {
            UserQuery::ByUsername(username) => &self.username == username,
        }
    }

    /// Profile edits only. `id` and `username` are fixed.
    async fn on_update(&mut self, update: UserUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}
