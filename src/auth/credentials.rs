//! Process-wide credential state.
//!
//! DESIGN
//! ======
//! The token pair is modelled as `Option<Credentials>`: an access token can
//! only exist together with the refresh token issued alongside it. Stores are
//! injected into the request client as `Arc<dyn CredentialStore>` so tests
//! can swap in the in-memory variant.
//!
//! Locks are plain `std::sync::RwLock`s held only for the copy in or out;
//! callers re-read the store at the point of use instead of caching tokens
//! across awaits.
//!
//! PERSISTENCE
//! ===========
//! `FileCredentialStore` keeps a JSON file `{"access": .., "refresh": ..}`.
//! A missing or malformed file at load means "not authenticated". Every
//! `set`/`clear` writes through; write failures are logged and the in-memory
//! state still changes.

#[cfg(test)]
#[path = "credentials_test.rs"]
mod credentials_test;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Access/refresh token pair obtained from one login or refresh.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub access: String,
    pub refresh: String,
}

impl Credentials {
    #[must_use]
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self { access: access.into(), refresh: refresh.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access", &"<redacted>")
            .field("refresh", &"<redacted>")
            .finish()
    }
}

/// Errors from persisting credentials to disk.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("credential file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("credential encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Shared, mutable credential state.
pub trait CredentialStore: Send + Sync {
    fn get(&self) -> Option<Credentials>;

    /// Replace the stored pair (login or refresh).
    fn set(&self, credentials: Credentials);

    /// Drop both tokens (logout).
    fn clear(&self);

    fn access_token(&self) -> Option<String> {
        self.get().map(|c| c.access)
    }

    fn refresh_token(&self) -> Option<String> {
        self.get().map(|c| c.refresh)
    }

    fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }
}

// =============================================================================
// IN-MEMORY
// =============================================================================

/// Non-persistent store; starts empty unless seeded.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    inner: RwLock<Option<Credentials>>,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self { inner: RwLock::new(Some(credentials)) }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> Option<Credentials> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set(&self, credentials: Credentials) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(credentials);
    }

    fn clear(&self) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

// =============================================================================
// FILE-BACKED
// =============================================================================

/// Store persisted as a JSON file, rehydrated once at construction.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    inner: RwLock<Option<Credentials>>,
}

impl FileCredentialStore {
    /// Rehydrate from `path`. Missing or malformed data yields an empty store.
    #[must_use]
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let credentials = read_credentials(&path);
        debug!(path = %path.display(), authenticated = credentials.is_some(), "credentials loaded");
        Self { path, inner: RwLock::new(credentials) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the current state to disk; an empty state removes the file.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError`] if the file cannot be written or removed.
    pub fn save(&self) -> Result<(), CredentialError> {
        let current = self.get();
        let io_err = |source| CredentialError::Io { path: self.path.clone(), source };
        match current {
            Some(credentials) => {
                if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).map_err(io_err)?;
                }
                let raw = serde_json::to_string(&credentials)?;
                write_private(&self.path, raw.as_bytes()).map_err(io_err)
            }
            None => match std::fs::remove_file(&self.path) {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(io_err(e)),
                _ => Ok(()),
            },
        }
    }

    fn save_logged(&self) {
        if let Err(e) = self.save() {
            warn!(error = %e, "credential persistence failed");
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> Option<Credentials> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set(&self, credentials: Credentials) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(credentials);
        self.save_logged();
    }

    fn clear(&self) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = None;
        self.save_logged();
    }
}

/// Write `contents` readable by the owner only.
#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // `mode` only applies when the file is created.
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    file.write_all(contents)
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    std::fs::write(path, contents)
}

fn read_credentials(path: &Path) -> Option<Credentials> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "credential file unreadable");
            return None;
        }
    };
    match serde_json::from_str::<Credentials>(&raw) {
        Ok(credentials) => Some(credentials),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring malformed credential file");
            None
        }
    }
}
