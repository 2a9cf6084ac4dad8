//! Session store
//!
//! The single authority on whether a user is logged in, and who. State lives in memory for
//! synchronous reads by guards, and is mirrored to durable storage so it survives restarts.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use color_eyre::Result;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, error, info, instrument, warn};

use crate::claims::UserClaims;
use crate::storage::{AUTHORIZED_KEY, Storage, TOKEN_KEY, USER_DATA_KEY};

/// Snapshot of the session state
///
/// When `is_authenticated` is set, `user` is always present.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Session {
    pub is_authenticated: bool,
    pub user: Option<UserClaims>,
}

impl Session {
    /// Session with no user logged in
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Session of the user described by `claims`
    pub fn authenticated(claims: UserClaims) -> Self {
        Self {
            is_authenticated: true,
            user: Some(claims),
        }
    }

    /// Reads the session from storage
    ///
    /// A marker without readable claims is treated as no session at all.
    async fn read(storage: &dyn Storage) -> Result<Self> {
        let marker = storage
            .get(AUTHORIZED_KEY)
            .await?
            .is_some_and(|marker| !marker.is_empty());
        if !marker {
            return Ok(Self::anonymous());
        }

        let Some(user_data) = storage.get(USER_DATA_KEY).await? else {
            warn!("Authorization marker stored without user data");
            return Ok(Self::anonymous());
        };

        match serde_json::from_str(&user_data) {
            Ok(claims) => Ok(Self::authenticated(claims)),
            Err(err) => {
                warn!(%err, "Stored user data is not valid claims");
                Ok(Self::anonymous())
            }
        }
    }
}

/// Shared session state backed by durable storage
pub struct SessionStore {
    storage: Arc<dyn Storage>,
    state: watch::Sender<Session>,
}

impl SessionStore {
    /// Creates the store seeding its state from `storage`
    pub async fn load(storage: Arc<dyn Storage>) -> Result<Self> {
        let session = Session::read(storage.as_ref()).await?;
        debug!(
            authenticated = session.is_authenticated,
            "Session loaded from storage"
        );

        Ok(Self {
            storage,
            state: watch::Sender::new(session),
        })
    }

    /// Current session snapshot
    pub fn current(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated
    }

    /// Claims of the logged in user
    pub fn user(&self) -> Option<UserClaims> {
        self.state.borrow().user.clone()
    }

    /// Receiver notified on every session change
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Underlying storage
    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// Logs the user in
    ///
    /// Claims are trusted as given; they are expected to come from a backend issued token.
    #[instrument(skip_all, fields(user_id = claims.id))]
    pub async fn login(&self, claims: UserClaims) -> Result<()> {
        let user_data = serde_json::to_string(&claims)?;
        self.storage.set(AUTHORIZED_KEY, "true").await?;
        self.storage.set(USER_DATA_KEY, &user_data).await?;

        self.state.send_replace(Session::authenticated(claims));
        info!("User logged in");
        Ok(())
    }

    /// Logs the user out, clearing the session and the bearer token
    ///
    /// The in-memory session becomes anonymous even if clearing storage fails. Every key removal
    /// is attempted and the first failure is reported. Logging out with no user logged in does
    /// nothing beyond clearing storage.
    #[instrument(skip_all)]
    pub async fn logout(&self) -> Result<()> {
        let was_authenticated = self.state.send_if_modified(|session| {
            let modified = *session != Session::anonymous();
            *session = Session::anonymous();
            modified
        });

        if was_authenticated {
            info!("User logged out");
        }

        let mut result = Ok(());
        for key in [AUTHORIZED_KEY, USER_DATA_KEY, TOKEN_KEY] {
            if let Err(err) = self.storage.remove(key).await {
                error!(key, ?err, "Cannot clear session key");
                if result.is_ok() {
                    result = Err(err);
                }
            }
        }
        result
    }

    /// Re-reads the session from storage
    ///
    /// Picks up changes made by other processes sharing the same storage.
    pub async fn reload(&self) -> Result<()> {
        let session = Session::read(self.storage.as_ref()).await?;
        self.state.send_if_modified(|current| {
            let modified = *current != session;
            *current = session;
            modified
        });
        Ok(())
    }

    /// Bearer token for backend requests
    pub async fn token(&self) -> Result<Option<String>> {
        self.storage.get(TOKEN_KEY).await
    }

    /// Stores the bearer token verbatim
    pub async fn set_token(&self, token: &str) -> Result<()> {
        self.storage.set(TOKEN_KEY, token).await
    }

    /// Logs out if the held claims expired at `now`
    ///
    /// Returns `true` if the session was terminated.
    pub async fn check_expiry(&self, now: DateTime<Utc>) -> Result<bool> {
        let expired = self
            .state
            .borrow()
            .user
            .as_ref()
            .is_some_and(|user| user.is_expired_at(now));

        if expired {
            info!(%now, "Session expired");
            self.logout().await?;
        }

        Ok(expired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::tests::claims;
    use crate::storage::{MemoryStorage, SqliteStorage};

    async fn store() -> (Arc<MemoryStorage>, SessionStore) {
        let storage = Arc::new(MemoryStorage::new());
        let store = SessionStore::load(storage.clone()).await.unwrap();
        (storage, store)
    }

    fn at(timestamp: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(timestamp, 0).unwrap()
    }

    #[tokio::test]
    async fn anonymous_initially() {
        let (_, store) = store().await;

        assert!(!store.is_authenticated());
        assert_eq!(store.current(), Session::anonymous());
    }

    #[tokio::test]
    async fn login_roundtrip() {
        let (storage, store) = store().await;
        let user = claims(2_000);

        store.login(user.clone()).await.unwrap();
        assert!(store.is_authenticated());
        assert_eq!(store.user(), Some(user.clone()));

        assert_eq!(
            storage.get(AUTHORIZED_KEY).await.unwrap().as_deref(),
            Some("true")
        );

        // Survives a restart
        let restored = SessionStore::load(storage).await.unwrap();
        assert_eq!(restored.current(), Session::authenticated(user));
    }

    #[tokio::test]
    async fn login_roundtrip_sqlite() {
        let storage = Arc::new(SqliteStorage::memory().await.unwrap());
        let store = SessionStore::load(storage.clone()).await.unwrap();
        let user = claims(2_000);

        store.login(user.clone()).await.unwrap();

        let restored = SessionStore::load(storage).await.unwrap();
        assert_eq!(restored.user(), Some(user));
    }

    #[tokio::test]
    async fn logout_clears_storage() {
        let (storage, store) = store().await;

        store.set_token("header.payload.signature").await.unwrap();
        store.login(claims(2_000)).await.unwrap();
        store.logout().await.unwrap();

        assert!(!store.is_authenticated());
        assert_eq!(store.user(), None);
        assert_eq!(storage.get(AUTHORIZED_KEY).await.unwrap(), None);
        assert_eq!(storage.get(USER_DATA_KEY).await.unwrap(), None);
        assert_eq!(storage.get(TOKEN_KEY).await.unwrap(), None);
        assert!(storage.is_empty().await);
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let (storage, store) = store().await;
        let changes = store.subscribe();

        store.logout().await.unwrap();
        store.logout().await.unwrap();

        assert!(!store.is_authenticated());
        assert!(storage.is_empty().await);
        assert!(!changes.has_changed().unwrap());
    }

    /// Storage refusing to remove the user data
    struct StickyUserData(MemoryStorage);

    #[async_trait::async_trait]
    impl Storage for StickyUserData {
        async fn get(&self, key: &str) -> Result<Option<String>> {
            self.0.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> Result<()> {
            self.0.set(key, value).await
        }

        async fn remove(&self, key: &str) -> Result<()> {
            if key == USER_DATA_KEY {
                color_eyre::eyre::bail!("Storage is read-only");
            }
            self.0.remove(key).await
        }
    }

    #[tokio::test]
    async fn failed_storage_cleanup_still_logs_out() {
        let storage = Arc::new(StickyUserData(MemoryStorage::new()));
        let store = SessionStore::load(storage.clone()).await.unwrap();
        store.set_token("header.payload.signature").await.unwrap();
        store.login(claims(1_000)).await.unwrap();

        assert!(store.check_expiry(at(5_000)).await.is_err());

        assert!(!store.is_authenticated());
        assert_eq!(store.user(), None);
        // Keys after the failing one are still removed
        assert_eq!(storage.get(AUTHORIZED_KEY).await.unwrap(), None);
        assert_eq!(storage.get(TOKEN_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn subscribers_observe_changes() {
        let (_, store) = store().await;
        let mut changes = store.subscribe();

        store.login(claims(2_000)).await.unwrap();
        assert!(changes.has_changed().unwrap());
        assert!(changes.borrow_and_update().is_authenticated);

        store.logout().await.unwrap();
        assert!(changes.has_changed().unwrap());
        assert!(!changes.borrow_and_update().is_authenticated);
    }

    #[tokio::test]
    async fn expired_login_terminated_on_check() {
        let (storage, store) = store().await;

        store.login(claims(1_000)).await.unwrap();
        assert!(store.is_authenticated());

        assert!(store.check_expiry(at(1_001)).await.unwrap());
        assert!(!store.is_authenticated());
        assert!(storage.is_empty().await);
    }

    #[tokio::test]
    async fn valid_session_survives_check() {
        let (_, store) = store().await;

        store.login(claims(1_000)).await.unwrap();
        assert!(!store.check_expiry(at(999)).await.unwrap());
        assert!(!store.check_expiry(at(1_000)).await.unwrap());
        assert!(store.is_authenticated());

        // Nothing to expire when anonymous
        store.logout().await.unwrap();
        assert!(!store.check_expiry(at(5_000)).await.unwrap());
    }

    #[tokio::test]
    async fn corrupted_storage_loads_anonymous() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(AUTHORIZED_KEY, "true").await.unwrap();

        let store = SessionStore::load(storage.clone()).await.unwrap();
        assert_eq!(store.current(), Session::anonymous());

        storage.set(USER_DATA_KEY, "{not json").await.unwrap();
        let store = SessionStore::load(storage.clone()).await.unwrap();
        assert_eq!(store.current(), Session::anonymous());

        // User data without the marker is ignored as well
        storage.remove(AUTHORIZED_KEY).await.unwrap();
        storage
            .set(USER_DATA_KEY, &serde_json::to_string(&claims(10)).unwrap())
            .await
            .unwrap();
        let store = SessionStore::load(storage).await.unwrap();
        assert_eq!(store.current(), Session::anonymous());
    }

    #[tokio::test]
    async fn reload_picks_external_changes() {
        let storage = Arc::new(MemoryStorage::new());
        let first = SessionStore::load(storage.clone()).await.unwrap();
        let second = SessionStore::load(storage.clone()).await.unwrap();

        first.login(claims(2_000)).await.unwrap();
        assert!(!second.is_authenticated());

        second.reload().await.unwrap();
        assert_eq!(second.user(), Some(claims(2_000)));

        second.logout().await.unwrap();
        first.reload().await.unwrap();
        assert!(!first.is_authenticated());
    }
}
