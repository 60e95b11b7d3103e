use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::credentials::{CredentialError, CredentialResult, CredentialStore};
use crate::domain::types::BearerToken;

/// Stores the token as the only content of a file.
///
/// A missing or blank file means no credential.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> CredentialResult<Option<BearerToken>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let content = content.trim();
        if content.is_empty() {
            return Ok(None);
        }
        BearerToken::new(content)
            .map(Some)
            .map_err(|_| CredentialError::Invalid)
    }

    fn save(&self, token: &BearerToken) -> CredentialResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, token.as_str())?;
        Ok(())
    }

    fn remove(&self) -> CredentialResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
