// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 CAB Ingénierie / Christophe ABOULICAM
//! Session / Identity Holder
//!
//! Holds the current identity and access token for one client session.
//! The holder is an owned value passed to whoever needs it; there is no
//! process-wide session.
//!
//! Lifecycle:
//! - `restore` at startup re-reads durable storage
//! - `login` replaces the session on success and changes nothing on failure
//! - `logout` clears memory and storage, and never fails
//!
//! Token expiry is not tracked. A session lasts until `logout`.

pub mod client;
pub mod error;
pub mod store;

pub use client::{Authenticator, ClientConfig, Credentials, HttpAuthenticator, LoginResponse};
pub use error::SessionError;
pub use store::{FileStore, MemoryStore, SessionStore, IDENTITY_KEY, TOKEN_KEY};

use tracing::{debug, info, warn};

use crate::guard::{self, AccessDenied, Requirement};
use crate::identity::Identity;
use crate::navigation;
use crate::page::{self, PageView};
use crate::registry::{ModuleDescriptor, ModuleRegistry};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Current {
    identity: Identity,
    token: String,
}

/// The client-side session.
#[derive(Debug)]
pub struct Session<S: SessionStore> {
    store: S,
    current: Option<Current>,
}

impl<S: SessionStore> Session<S> {
    /// Start a logged-out session without reading storage.
    pub fn new(store: S) -> Self {
        Self {
            store,
            current: None,
        }
    }

    /// Rebuild the session from durable storage.
    ///
    /// A half-written or unreadable session is discarded and storage is
    /// cleared, so the user simply logs in again.
    pub fn restore(store: S) -> Self {
        let mut session = Self::new(store);

        match session.read_stored() {
            Ok(Some(current)) => {
                debug!(user_id = %current.identity.id, "Restored session from storage");
                session.current = Some(current);
            }
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "Discarding unreadable stored session");
                session.clear_storage();
            }
        }

        session
    }

    fn read_stored(&self) -> Result<Option<Current>, SessionError> {
        let token = self.store.load(TOKEN_KEY)?;
        let identity = self.store.load(IDENTITY_KEY)?;

        match (token, identity) {
            (Some(token), Some(identity)) => Ok(Some(Current {
                identity: serde_json::from_str(&identity)?,
                token,
            })),
            (None, None) => Ok(None),
            _ => Err(SessionError::Storage(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "only one of token and identity is stored",
            ))),
        }
    }

    /// Authenticate and, on success, replace the current session.
    pub async fn login<A>(
        &mut self,
        authenticator: &A,
        credentials: &Credentials,
    ) -> Result<&Identity, SessionError>
    where
        A: Authenticator + ?Sized,
    {
        let LoginResponse { token, user } = authenticator.authenticate(credentials).await?;

        self.persist(&token, &user)?;

        info!(user_id = %user.id, role = %user.role, "Logged in");
        let current = self.current.insert(Current {
            identity: user,
            token,
        });
        Ok(&current.identity)
    }

    fn persist(&mut self, token: &str, identity: &Identity) -> Result<(), SessionError> {
        let serialized = serde_json::to_string(identity)?;

        let written = self
            .store
            .save(IDENTITY_KEY, &serialized)
            .and_then(|()| self.store.save(TOKEN_KEY, token));

        if let Err(e) = written {
            // Put storage back to whatever session is still held in memory.
            match self.current.clone() {
                Some(previous) => {
                    let restored = serde_json::to_string(&previous.identity)
                        .map_err(std::io::Error::from)
                        .and_then(|json| self.store.save(IDENTITY_KEY, &json))
                        .and_then(|()| self.store.save(TOKEN_KEY, &previous.token));
                    if let Err(restore_err) = restored {
                        warn!(error = %restore_err, "Failed to restore previous stored session");
                    }
                }
                None => self.clear_storage(),
            }
            return Err(SessionError::Storage(e));
        }

        Ok(())
    }

    /// End the session. Idempotent and infallible.
    pub fn logout(&mut self) {
        if let Some(previous) = self.current.take() {
            info!(user_id = %previous.identity.id, "Logged out");
        }
        self.clear_storage();
    }

    fn clear_storage(&mut self) {
        for key in [TOKEN_KEY, IDENTITY_KEY] {
            if let Err(e) = self.store.remove(key) {
                warn!(key, error = %e, "Failed to clear stored session entry");
            }
        }
    }

    pub fn current_identity(&self) -> Option<&Identity> {
        self.current.as_ref().map(|c| &c.identity)
    }

    /// Access token to attach to API requests.
    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|c| c.token.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_authorized(&self, requirement: Requirement) -> bool {
        guard::is_authorized(self.current_identity(), requirement)
    }

    pub fn authorize(&self, requirement: Requirement) -> Result<(), AccessDenied> {
        guard::authorize(self.current_identity(), requirement)
    }

    pub fn visible_modules<'a>(&self, registry: &ModuleRegistry<'a>) -> Vec<&'a ModuleDescriptor> {
        navigation::visible_modules(self.current_identity(), registry)
    }

    pub fn open_page<'a>(&self, registry: &ModuleRegistry<'a>, route: &str) -> PageView<'a> {
        page::open_page(self.current_identity(), registry, route)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{PermissionTag, Role};
    use async_trait::async_trait;
    use std::io;

    const PASSWORD: &str = "correct horse";

    struct FakeAuthenticator {
        user: Identity,
    }

    #[async_trait]
    impl Authenticator for FakeAuthenticator {
        async fn authenticate(
            &self,
            credentials: &Credentials,
        ) -> Result<LoginResponse, SessionError> {
            if credentials.email == self.user.email && credentials.password == PASSWORD {
                Ok(LoginResponse {
                    token: format!("token-for-{}", self.user.id),
                    user: self.user.clone(),
                })
            } else {
                Err(SessionError::Authentication {
                    message: error::INVALID_CREDENTIALS_MESSAGE.to_string(),
                })
            }
        }
    }

    /// Store whose writes fail once armed.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail_saves: bool,
    }

    impl SessionStore for FlakyStore {
        fn load(&self, key: &str) -> io::Result<Option<String>> {
            self.inner.load(key)
        }

        fn save(&mut self, key: &str, value: &str) -> io::Result<()> {
            if self.fail_saves && key == TOKEN_KEY {
                return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
            }
            self.inner.save(key, value)
        }

        fn remove(&mut self, key: &str) -> io::Result<()> {
            self.inner.remove(key)
        }
    }

    fn loan_clerk() -> Identity {
        Identity::new("u-17", "Ama Mensah", "ama@bursary.example", Role::Clerk)
            .with_permissions([PermissionTag::LoanLedgerManagement])
    }

    fn authenticator() -> FakeAuthenticator {
        FakeAuthenticator { user: loan_clerk() }
    }

    #[tokio::test]
    async fn test_login_stores_identity_and_token() {
        let mut session = Session::new(MemoryStore::new());
        let identity = session
            .login(&authenticator(), &Credentials::new("ama@bursary.example", PASSWORD))
            .await
            .unwrap()
            .clone();

        assert_eq!(identity, loan_clerk());
        assert_eq!(session.current_identity(), Some(&identity));
        assert_eq!(session.token(), Some("token-for-u-17"));
        assert_eq!(
            session.store().load(TOKEN_KEY).unwrap(),
            Some("token-for-u-17".to_string())
        );
        assert!(session.store().load(IDENTITY_KEY).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_failed_login_changes_nothing() {
        let mut session = Session::new(MemoryStore::new());
        let err = session
            .login(&authenticator(), &Credentials::new("x", "wrong"))
            .await
            .unwrap_err();

        assert!(err.is_authentication_failure());
        assert_eq!(err.user_message(), "Invalid email or password");
        assert!(session.current_identity().is_none());
        assert!(session.store().is_empty());
    }

    #[tokio::test]
    async fn test_failed_login_keeps_previous_session() {
        let mut session = Session::new(MemoryStore::new());
        let auth = authenticator();
        session
            .login(&auth, &Credentials::new("ama@bursary.example", PASSWORD))
            .await
            .unwrap();

        let _ = session
            .login(&auth, &Credentials::new("ama@bursary.example", "nope"))
            .await
            .unwrap_err();

        assert_eq!(session.current_identity(), Some(&loan_clerk()));
    }

    #[tokio::test]
    async fn test_restore_round_trip() {
        let mut session = Session::new(MemoryStore::new());
        let logged_in = session
            .login(&authenticator(), &Credentials::new("ama@bursary.example", PASSWORD))
            .await
            .unwrap()
            .clone();

        let reloaded = Session::restore(session.into_store());
        assert_eq!(reloaded.current_identity(), Some(&logged_in));
        assert_eq!(reloaded.token(), Some("token-for-u-17"));
    }

    #[tokio::test]
    async fn test_logout_twice() {
        let mut session = Session::new(MemoryStore::new());
        session
            .login(&authenticator(), &Credentials::new("ama@bursary.example", PASSWORD))
            .await
            .unwrap();

        session.logout();
        assert!(session.current_identity().is_none());
        assert!(session.store().is_empty());

        session.logout();
        assert!(session.current_identity().is_none());

        let reloaded = Session::restore(session.into_store());
        assert!(!reloaded.is_authenticated());
    }

    #[test]
    fn test_restore_discards_half_session() {
        let mut store = MemoryStore::new();
        store.save(TOKEN_KEY, "orphan").unwrap();

        let session = Session::restore(store);
        assert!(!session.is_authenticated());
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_restore_discards_corrupt_identity() {
        let mut store = MemoryStore::new();
        store.save(TOKEN_KEY, "t").unwrap();
        store.save(IDENTITY_KEY, "{not json").unwrap();

        let session = Session::restore(store);
        assert!(!session.is_authenticated());
        assert!(session.store().is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_on_first_login_leaves_nothing() {
        let store = FlakyStore {
            fail_saves: true,
            ..Default::default()
        };
        let mut session = Session::new(store);

        let err = session
            .login(&authenticator(), &Credentials::new("ama@bursary.example", PASSWORD))
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::Storage(_)));
        assert!(!session.is_authenticated());
        assert!(session.store().inner.is_empty());
    }

    #[tokio::test]
    async fn test_session_guard_delegation() {
        let mut session = Session::new(MemoryStore::new());
        let fuel = Requirement::Permission(PermissionTag::FuelAllowanceManagement);
        let loans = Requirement::Permission(PermissionTag::LoanLedgerManagement);
        assert!(!session.is_authorized(loans));

        session
            .login(&authenticator(), &Credentials::new("ama@bursary.example", PASSWORD))
            .await
            .unwrap();

        assert!(session.is_authorized(loans));
        assert!(session.authorize(fuel).is_err());

        let registry = ModuleRegistry::builtin();
        let titles: Vec<_> = session
            .visible_modules(&registry)
            .iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(titles, vec!["Loan Ledger"]);
        assert_eq!(
            session.open_page(&registry, "/fuel-allowance"),
            PageView::Unauthorized
        );
    }
}
