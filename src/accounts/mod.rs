//! # Accounts
//!
//! Registration, login and profile edits on top of the replicated user store. A successful
//! register or login hands back a [`Session`]; every later call that acts on behalf of a
//! user takes that session explicitly.

pub mod password;

use actor_framework::FrameworkError;
use tracing::{debug, info, instrument, warn};

use crate::model::{Registration, Session, User, UserCreate, UserId, UserQuery, UserUpdate};
use crate::replication::ReplicatedStore;
use crate::user_actor::UserError;

use self::password::{hash_password, verify_password};

fn map_error(e: FrameworkError) -> UserError {
    match e.downcast_entity::<UserError>() {
        Ok(typed) => typed,
        Err(FrameworkError::NotFound(id)) => UserError::NotFound(id),
        Err(other) => UserError::ActorCommunicationError(other.to_string()),
    }
}

#[derive(Clone)]
pub struct AccountService {
    users: ReplicatedStore<User>,
}

impl AccountService {
    pub fn new(users: ReplicatedStore<User>) -> Self {
        Self { users }
    }

    /// Creates an account and signs it in.
    ///
    /// The username must be free in both stores. The local store rejects a duplicate in the
    /// same step as the insert, so concurrent registrations cannot both win. The local write
    /// is required; the mirror copy is best-effort.
    #[instrument(skip(self, registration), fields(username = %registration.username))]
    pub async fn register(&self, registration: Registration) -> Result<Session, UserError> {
        let username = registration.username.trim().to_string();
        if username.is_empty() {
            return Err(UserError::ValidationError("username is required".into()));
        }
        if registration.password.is_empty() {
            return Err(UserError::ValidationError("password is required".into()));
        }

        if self
            .users
            .find_one(UserQuery::ByUsername(username.clone()))
            .await
            .map_err(map_error)?
            .is_some()
        {
            debug!("Username already taken");
            return Err(UserError::UsernameTaken(username));
        }

        let password_hash = hash_password(&registration.password)?;
        let user_id = self
            .users
            .local()
            .create(UserCreate {
                username: username.clone(),
                name: registration.name,
                email: registration.email,
                phone: registration.phone,
                password_hash,
            })
            .await
            .map_err(map_error)?;
        self.users.mirror_from_local(&user_id).await;

        info!(%user_id, "User registered");
        Ok(Session { user_id, username })
    }

    /// Checks credentials and returns a session.
    ///
    /// The mirror is asked first. Only once the password checks out is the account copied
    /// into the local store and written back to the mirror, so a failed attempt writes
    /// nothing.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, UserError> {
        let user = self
            .users
            .find_one(UserQuery::ByUsername(username.to_string()))
            .await
            .map_err(map_error)?
            .ok_or(UserError::InvalidCredentials)?;

        if let Err(e) = verify_password(password, &user.password_hash) {
            warn!("Login rejected");
            return Err(e);
        }

        let session = Session {
            user_id: user.id.clone(),
            username: user.username.clone(),
        };
        if let Err(e) = self.users.local().put(user.clone()).await {
            warn!(error = %e, "Could not store account locally");
        }
        self.users.mirror_put(user).await;
        info!(user_id = %session.user_id, "Logged in");
        Ok(session)
    }

    /// Edits the signed-in user's name, email or phone.
    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn update_profile(&self, session: &Session, update: UserUpdate) -> Result<User, UserError> {
        let user = self
            .users
            .local()
            .update(session.user_id.clone(), update)
            .await
            .map_err(map_error)?;
        self.users.mirror_put(user.clone()).await;
        Ok(user)
    }

    pub async fn get_user(&self, id: &UserId) -> Result<Option<User>, UserError> {
        self.users.fetch_current(id).await.map_err(map_error)
    }
}
