//! Durable storage for the bearer token.
//!
//! The token survives restarts of the client. A store holds at most one
//! credential; saving replaces it.

use thiserror::Error;

use crate::domain::types::BearerToken;

pub mod file;
pub mod memory;

pub use file::FileCredentialStore;
pub use memory::MemoryCredentialStore;

/// Errors raised by a credential store.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("credential storage unavailable: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored credential is invalid")]
    Invalid,
}

pub type CredentialResult<T> = Result<T, CredentialError>;

/// Key-value store holding the single persisted credential.
pub trait CredentialStore: Send + Sync {
    /// Returns the stored token, or `None` when nothing is stored.
    fn load(&self) -> CredentialResult<Option<BearerToken>>;
    /// Persists `token`, replacing any previous value.
    fn save(&self, token: &BearerToken) -> CredentialResult<()>;
    /// Removes the stored token. Removing an absent token succeeds.
    fn remove(&self) -> CredentialResult<()>;
}
