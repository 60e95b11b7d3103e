//! Session context shared by every service.
//!
//! A [`Session`] owns the credential store and a watchable "authenticated"
//! flag. Its write methods are the only way the stored credential changes, so
//! the flag and the persisted token always agree once a write returns.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;

use crate::api::ApiError;
use crate::credentials::CredentialStore;
use crate::domain::types::BearerToken;

pub mod executor;
pub mod refresh;

pub use executor::SessionExecutor;
pub use refresh::refresh;

/// Errors raised while running authenticated operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("no credential stored")]
    MissingCredential,
    #[error("token refresh failed: {0}")]
    RefreshFailed(String),
    #[error("credential storage failed: {0}")]
    Storage(String),
    #[error("operation cancelled")]
    Cancelled,
    #[error(transparent)]
    Api(#[from] ApiError),
}

pub type SessionResult<T> = Result<T, SessionError>;

pub struct Session {
    store: Arc<dyn CredentialStore>,
    authenticated: watch::Sender<bool>,
}

impl Session {
    /// Opens a session over `store`; the flag starts from what is persisted.
    pub fn new(store: Arc<dyn CredentialStore>) -> SessionResult<Self> {
        let authenticated = store.load()?.is_some();
        Ok(Self {
            store,
            authenticated: watch::Sender::new(authenticated),
        })
    }

    /// Current bearer token.
    ///
    /// Fails with [`SessionError::MissingCredential`] when nothing is stored.
    pub fn token(&self) -> SessionResult<BearerToken> {
        match self.store.load()? {
            Some(token) => {
                // Storage was written behind our back.
                self.authenticated.send_if_modified(|flag| !std::mem::replace(flag, true));
                Ok(token)
            }
            None => {
                // Storage was cleared behind our back.
                self.authenticated.send_if_modified(|flag| std::mem::replace(flag, false));
                Err(SessionError::MissingCredential)
            }
        }
    }

    /// Persists `token` and marks the session authenticated.
    pub fn set_token(&self, token: &BearerToken) -> SessionResult<()> {
        self.store.save(token)?;
        self.authenticated.send_if_modified(|flag| !std::mem::replace(flag, true));
        Ok(())
    }

    /// Forgets the stored token and marks the session unauthenticated.
    pub fn clear_token(&self) -> SessionResult<()> {
        self.store.remove()?;
        self.authenticated.send_if_modified(|flag| std::mem::replace(flag, false));
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        *self.authenticated.borrow()
    }

    /// Receiver notified whenever the authenticated flag changes.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.authenticated.subscribe()
    }
}
