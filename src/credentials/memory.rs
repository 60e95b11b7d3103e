use std::sync::Mutex;

use crate::credentials::{CredentialResult, CredentialStore};
use crate::domain::types::BearerToken;

/// Process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: Mutex<Option<BearerToken>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: BearerToken) -> Self {
        Self {
            token: Mutex::new(Some(token)),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<BearerToken>> {
        // A poisoned slot still holds a consistent Option.
        self.token.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> CredentialResult<Option<BearerToken>> {
        Ok(self.slot().clone())
    }

    fn save(&self, token: &BearerToken) -> CredentialResult<()> {
        *self.slot() = Some(token.clone());
        Ok(())
    }

    fn remove(&self) -> CredentialResult<()> {
        *self.slot() = None;
        Ok(())
    }
}
