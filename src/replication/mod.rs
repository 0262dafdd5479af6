//! # Replication
//!
//! Every replicated entity lives in two stores: the local store, which is authoritative for
//! writes, and an optional remote mirror. [`ReplicatedStore`] holds both ports and the
//! [`SyncPolicy`] that decides how reads and writes use them.
//!
//! Mirror failures never reach callers. They are logged as a [`MirrorSyncFailure`] and the
//! operation carries on with the local result.

use std::collections::HashSet;
use std::str::FromStr;

use actor_framework::{ActorEntity, FrameworkError, ResourceClient};
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Which store answers reads first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadPreference {
    /// Ask the mirror, fall back to local when it has nothing or cannot be reached.
    #[default]
    MirrorFirst,
    LocalOnly,
}

impl FromStr for ReadPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mirror-first" => Ok(ReadPreference::MirrorFirst),
            "local-only" => Ok(ReadPreference::LocalOnly),
            other => Err(format!("unknown read preference: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncPolicy {
    pub read: ReadPreference,
    /// Copy local writes to the mirror.
    pub mirror_writes: bool,
}

impl Default for SyncPolicy {
    fn default() -> Self {
        Self {
            read: ReadPreference::MirrorFirst,
            mirror_writes: true,
        }
    }
}

/// A mirror write or read that did not go through.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Mirror sync failed for {entity_type} {id}: {reason}")]
pub struct MirrorSyncFailure {
    pub entity_type: &'static str,
    pub id: String,
    pub reason: String,
}

/// Local store plus optional mirror for one entity type.
pub struct ReplicatedStore<T: ActorEntity> {
    local: ResourceClient<T>,
    mirror: Option<ResourceClient<T>>,
    policy: SyncPolicy,
}

impl<T: ActorEntity> Clone for ReplicatedStore<T> {
    fn clone(&self) -> Self {
        Self {
            local: self.local.clone(),
            mirror: self.mirror.clone(),
            policy: self.policy,
        }
    }
}

fn entity_type<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

impl<T: ActorEntity> ReplicatedStore<T> {
    pub fn new(local: ResourceClient<T>, mirror: Option<ResourceClient<T>>, policy: SyncPolicy) -> Self {
        Self {
            local,
            mirror,
            policy,
        }
    }

    /// A store with no mirror at all.
    pub fn local_only(local: ResourceClient<T>) -> Self {
        Self::new(local, None, SyncPolicy::default())
    }

    /// The authoritative store. All conditional writes go here.
    pub fn local(&self) -> &ResourceClient<T> {
        &self.local
    }

    pub fn policy(&self) -> SyncPolicy {
        self.policy
    }

    fn read_mirror(&self) -> Option<&ResourceClient<T>> {
        match self.policy.read {
            ReadPreference::MirrorFirst => self.mirror.as_ref(),
            ReadPreference::LocalOnly => None,
        }
    }

    fn write_mirror(&self) -> Option<&ResourceClient<T>> {
        if self.policy.mirror_writes {
            self.mirror.as_ref()
        } else {
            None
        }
    }

    fn failure(&self, id: impl ToString, reason: impl ToString) -> MirrorSyncFailure {
        let failure = MirrorSyncFailure {
            entity_type: entity_type::<T>(),
            id: id.to_string(),
            reason: reason.to_string(),
        };
        warn!(
            entity_type = failure.entity_type,
            id = %failure.id,
            reason = %failure.reason,
            "Mirror sync failure"
        );
        failure
    }

    /// Current version of a record.
    ///
    /// The mirror's copy wins when it has one. A miss or an error on the mirror falls back to
    /// the local store; an error on the local store is returned.
    #[instrument(skip(self), fields(entity_type = entity_type::<T>()))]
    pub async fn fetch_current(&self, id: &T::Id) -> Result<Option<T>, FrameworkError> {
        if let Some(mirror) = self.read_mirror() {
            match mirror.get(id.clone()).await {
                Ok(Some(item)) => {
                    debug!(%id, "Served from mirror");
                    return Ok(Some(item));
                }
                Ok(None) => debug!(%id, "Mirror miss, reading local"),
                Err(e) => {
                    self.failure(id, e);
                }
            }
        }
        self.local.get(id.clone()).await
    }

    /// Best-effort copy of `item` to the mirror.
    ///
    /// Returns the failure for callers that want to inspect it; it has already been logged.
    pub async fn mirror_put(&self, item: T) -> Option<MirrorSyncFailure> {
        let mirror = self.write_mirror()?;
        let id = item.id().clone();
        match mirror.put(item).await {
            Ok(()) => {
                debug!(entity_type = entity_type::<T>(), %id, "Mirrored");
                None
            }
            Err(e) => Some(self.failure(id, e)),
        }
    }

    /// Reads the local record and copies it to the mirror.
    pub async fn mirror_from_local(&self, id: &T::Id) -> Option<MirrorSyncFailure> {
        self.write_mirror()?;
        match self.local.get(id.clone()).await {
            Ok(Some(item)) => self.mirror_put(item).await,
            Ok(None) => Some(self.failure(id, "record missing from local store")),
            Err(e) => Some(self.failure(id, e)),
        }
    }

    /// Best-effort removal from the mirror. A record the mirror never had is not a failure.
    pub async fn mirror_delete(&self, id: &T::Id) -> Option<MirrorSyncFailure> {
        let mirror = self.write_mirror()?;
        match mirror.delete(id.clone()).await {
            Ok(()) | Err(FrameworkError::NotFound(_)) => None,
            Err(e) => Some(self.failure(id, e)),
        }
    }

    /// Union of the local and mirror results for `query`.
    ///
    /// On an id present in both, the local record wins. Records only the mirror has are
    /// written into the local store so later conditional writes can see them. A mirror record
    /// the local store rejects is logged and left out.
    #[instrument(skip(self), fields(entity_type = entity_type::<T>()))]
    pub async fn list_merged(&self, query: T::Query) -> Result<Vec<T>, FrameworkError> {
        let mut merged = self.local.list(query.clone()).await?;
        let Some(mirror) = self.read_mirror() else {
            return Ok(merged);
        };

        let remote = match mirror.list(query).await {
            Ok(remote) => remote,
            Err(e) => {
                self.failure("*", e);
                return Ok(merged);
            }
        };

        let known: HashSet<T::Id> = merged.iter().map(|item| item.id().clone()).collect();
        for item in remote {
            if known.contains(item.id()) {
                continue;
            }
            debug!(id = %item.id(), "Backfilling from mirror");
            match self.local.put(item.clone()).await {
                Ok(()) => merged.push(item),
                Err(e @ FrameworkError::EntityError(_)) => {
                    self.failure(item.id(), format!("rejected by local store: {e}"));
                }
                Err(e) => return Err(e),
            }
        }
        Ok(merged)
    }

    /// First record matching `query`, mirror first. Read-only: a mirror hit is not copied
    /// into the local store.
    #[instrument(skip(self), fields(entity_type = entity_type::<T>()))]
    pub async fn find_one(&self, query: T::Query) -> Result<Option<T>, FrameworkError> {
        if let Some(mirror) = self.read_mirror() {
            match mirror.list(query.clone()).await {
                Ok(found) => {
                    if let Some(item) = found.into_iter().next() {
                        debug!(id = %item.id(), "Found in mirror");
                        return Ok(Some(item));
                    }
                }
                Err(e) => {
                    self.failure("*", e);
                }
            }
        }
        Ok(self.local.list(query).await?.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{User, UserId, UserQuery};
    use crate::user_actor::UserError;
    use actor_framework::mock::{unreachable_client, MockClient};
    use chrono::Utc;

    fn user(id: &str, username: &str) -> User {
        User {
            id: UserId::from(id),
            username: username.into(),
            name: username.into(),
            email: format!("{username}@example.test"),
            phone: String::new(),
            password_hash: "$argon2id$stub".into(),
            date_joined: Utc::now(),
        }
    }

    #[test]
    fn test_read_preference_parsing() {
        assert_eq!("mirror-first".parse(), Ok(ReadPreference::MirrorFirst));
        assert_eq!(" Local-Only ".parse(), Ok(ReadPreference::LocalOnly));
        assert!("remote".parse::<ReadPreference>().is_err());
    }

    #[tokio::test]
    async fn test_fetch_current_prefers_mirror_copy() {
        let local = MockClient::<User>::new();
        let mut mirror = MockClient::<User>::new();
        let mut remote = user("u1", "ana");
        remote.name = "Ana (mirror)".into();
        mirror.expect_get(UserId::from("u1")).return_ok(Some(remote.clone()));

        let store = ReplicatedStore::new(local.client(), Some(mirror.client()), SyncPolicy::default());
        let found = store.fetch_current(&UserId::from("u1")).await.unwrap();

        assert_eq!(found, Some(remote));
        mirror.verify();
        assert!(local.received().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_current_falls_back_when_mirror_unreachable() {
        let mut local = MockClient::<User>::new();
        local.expect_get(UserId::from("u1")).return_ok(Some(user("u1", "ana")));

        let store = ReplicatedStore::new(
            local.client(),
            Some(unreachable_client()),
            SyncPolicy::default(),
        );
        let found = store.fetch_current(&UserId::from("u1")).await.unwrap();

        assert_eq!(found.map(|u| u.username), Some("ana".to_string()));
        local.verify();
    }

    #[tokio::test]
    async fn test_mirror_put_failure_is_reported_not_raised() {
        let store = ReplicatedStore::new(
            unreachable_client::<User>(),
            Some(unreachable_client()),
            SyncPolicy::default(),
        );
        let failure = store.mirror_put(user("u1", "ana")).await.unwrap();
        assert_eq!(failure.entity_type, "User");
        assert_eq!(failure.id, "u1");
    }

    #[tokio::test]
    async fn test_mirror_writes_disabled_skips_mirror() {
        let mirror = MockClient::<User>::new();
        let store = ReplicatedStore::new(
            unreachable_client::<User>(),
            Some(mirror.client()),
            SyncPolicy {
                read: ReadPreference::LocalOnly,
                mirror_writes: false,
            },
        );
        assert!(store.mirror_put(user("u1", "ana")).await.is_none());
        assert!(mirror.received().is_empty());
    }

    #[tokio::test]
    async fn test_list_merged_local_wins_and_backfills() {
        let mut local = MockClient::<User>::new();
        let mut mirror = MockClient::<User>::new();
        let query = UserQuery::ByUsername("ana".into());

        let mut stale = user("u1", "ana");
        stale.name = "stale".into();
        local.expect_list().return_ok(vec![user("u1", "ana")]);
        mirror.expect_list().return_ok(vec![stale, user("u2", "ana")]);
        local.expect_put(UserId::from("u2")).return_ok(());

        let store = ReplicatedStore::new(local.client(), Some(mirror.client()), SyncPolicy::default());
        let merged = store.list_merged(query).await.unwrap();

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].name, "ana");
        assert_eq!(merged[1].id, UserId::from("u2"));
        local.verify();
        mirror.verify();
    }

    #[tokio::test]
    async fn test_list_merged_skips_records_local_rejects() {
        let mut local = MockClient::<User>::new();
        let mut mirror = MockClient::<User>::new();
        local.expect_list().return_ok(vec![user("u1", "ana")]);
        mirror.expect_list().return_ok(vec![user("u2", "ana")]);
        local
            .expect_put(UserId::from("u2"))
            .return_err(FrameworkError::EntityError(Box::new(UserError::UsernameTaken(
                "ana".into(),
            ))));

        let store = ReplicatedStore::new(local.client(), Some(mirror.client()), SyncPolicy::default());
        let merged = store
            .list_merged(UserQuery::ByUsername("ana".into()))
            .await
            .unwrap();

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, UserId::from("u1"));
        local.verify();
    }

    #[tokio::test]
    async fn test_find_one_does_not_write_local() {
        let local = MockClient::<User>::new();
        let mut mirror = MockClient::<User>::new();
        mirror.expect_list().return_ok(vec![user("u1", "ana")]);

        let store = ReplicatedStore::new(local.client(), Some(mirror.client()), SyncPolicy::default());
        let found = store.find_one(UserQuery::ByUsername("ana".into())).await.unwrap();

        assert_eq!(found.map(|u| u.id), Some(UserId::from("u1")));
        assert!(local.received().is_empty());
        mirror.verify();
    }
}
