//! Session holder - current identity and its persisted credential.
//!
//! One `SessionHolder` is shared (cheap clones) between the HTTP transport,
//! which reads the bearer token from it on every request, the complaint store,
//! which reads the role to pick an endpoint, and the front end. Mutation goes
//! through `login`/`logout`/`update_user`; readers get snapshots or a `watch`
//! receiver.

mod credential;

pub use credential::{Credential, CredentialStorage, parse_jwt_exp};

use shared::models::{Role, User};
use std::sync::Arc;
use tokio::sync::watch;

use crate::error::ClientResult;

#[derive(Debug)]
struct SessionInner {
    storage: Option<CredentialStorage>,
    state: watch::Sender<Option<Credential>>,
}

/// Current authenticated identity
#[derive(Debug, Clone)]
pub struct SessionHolder {
    inner: Arc<SessionInner>,
}

impl SessionHolder {
    /// Session that is never written to disk.
    pub fn in_memory() -> Self {
        Self::build(None)
    }

    /// Session persisted through `storage`. Call [`restore`](Self::restore) to
    /// pick up a previous login.
    pub fn with_storage(storage: CredentialStorage) -> Self {
        Self::build(Some(storage))
    }

    fn build(storage: Option<CredentialStorage>) -> Self {
        let (state, _) = watch::channel(None);
        Self {
            inner: Arc::new(SessionInner { storage, state }),
        }
    }

    /// Load the persisted credential. An expired one is discarded and removed.
    pub fn restore(&self) -> Option<User> {
        let storage = self.inner.storage.as_ref()?;
        let credential = storage.load()?;

        if credential.is_expired() {
            tracing::info!(user = credential.user.display_name(), "Stored session expired, discarding");
            if let Err(e) = storage.delete() {
                tracing::warn!(error = %e, "Failed to remove expired credential");
            }
            return None;
        }

        let user = credential.user.clone();
        tracing::info!(user = user.display_name(), role = %user.role, "Session restored");
        self.inner.state.send_replace(Some(credential));
        Some(user)
    }

    /// Set the current identity and persist it.
    ///
    /// When persisting fails the previous identity stays in place.
    pub fn login(&self, credential: Credential) -> ClientResult<()> {
        if let Some(storage) = &self.inner.storage {
            storage.save(&credential)?;
        }
        tracing::info!(
            user = credential.user.display_name(),
            role = %credential.user.role,
            "Logged in"
        );
        self.inner.state.send_replace(Some(credential));
        Ok(())
    }

    /// Clear the identity and the persisted credential.
    ///
    /// The in-memory identity is always cleared; a storage error is still
    /// reported so the caller can tell the file may linger.
    pub fn logout(&self) -> ClientResult<()> {
        let previous = self.inner.state.send_replace(None);
        if let Some(previous) = previous {
            tracing::info!(user = previous.user.display_name(), "Logged out");
        }
        if let Some(storage) = &self.inner.storage {
            storage.delete()?;
        }
        Ok(())
    }

    /// Replace the stored user record (e.g. after a profile edit).
    /// No-op without a session.
    pub fn update_user(&self, user: User) -> ClientResult<()> {
        let Some(mut credential) = self.credential() else {
            return Ok(());
        };
        credential.user = user;
        self.login(credential)
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner
            .state
            .borrow()
            .as_ref()
            .is_some_and(|c| !c.is_expired())
    }

    pub fn current_user(&self) -> Option<User> {
        self.inner.state.borrow().as_ref().map(|c| c.user.clone())
    }

    pub fn role(&self) -> Option<Role> {
        self.inner.state.borrow().as_ref().map(|c| c.user.role)
    }

    /// Bearer token for the next request; `None` when absent or expired.
    pub fn access_token(&self) -> Option<String> {
        self.inner
            .state
            .borrow()
            .as_ref()
            .filter(|c| !c.is_expired())
            .map(|c| c.access.clone())
    }

    pub fn credential(&self) -> Option<Credential> {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every login/logout.
    pub fn subscribe(&self) -> watch::Receiver<Option<Credential>> {
        self.inner.state.subscribe()
    }

    pub fn storage(&self) -> Option<&CredentialStorage> {
        self.inner.storage.as_ref()
    }
}
