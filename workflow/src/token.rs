//! Bearer credential store.
//!
//! SYSTEM CONTEXT
//! ==============
//! The token store is the only holder of the credential. The gateway reads it
//! for every request; login writes it; logout and 401 responses clear it.
//! Persistence is delegated to a [`CredentialStorage`] so the browser can keep
//! the token in `localStorage` while tests and the CLI stay in memory.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Backing storage for the credential.
pub trait CredentialStorage: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn remove(&self);
}

/// Process-local storage; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn with_token(token: &str) -> Self {
        Self {
            slot: Mutex::new(Some(token.to_owned())),
        }
    }
}

impl CredentialStorage for MemoryStorage {
    fn load(&self) -> Option<String> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn save(&self, token: &str) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
    }

    fn remove(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[derive(Default)]
struct Inner {
    token: Option<String>,
    generation: u64,
}

/// Shared handle to the current bearer credential.
///
/// Clones share state. Every `set`/`clear` bumps [`TokenStore::generation`],
/// which the session resolver uses to invalidate its cached identity.
#[derive(Clone)]
pub struct TokenStore {
    inner: Arc<Mutex<Inner>>,
    storage: Arc<dyn CredentialStorage>,
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("TokenStore")
            .field("authenticated", &inner.token.is_some())
            .field("generation", &inner.generation)
            .finish_non_exhaustive()
    }
}

impl TokenStore {
    /// Create a store, activating any credential already held by `storage`.
    pub fn new(storage: impl CredentialStorage + 'static) -> Self {
        let token = storage.load().filter(|t| !t.is_empty());
        Self {
            inner: Arc::new(Mutex::new(Inner { token, generation: 0 })),
            storage: Arc::new(storage),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::default())
    }

    /// Persist and activate `token`. An empty token clears the store.
    pub fn set(&self, token: &str) {
        if token.is_empty() {
            self.clear();
            return;
        }
        let mut inner = self.lock();
        inner.token = Some(token.to_owned());
        inner.generation += 1;
        self.storage.save(token);
    }

    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.lock().token.clone()
    }

    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.token = None;
        inner.generation += 1;
        self.storage.remove();
    }

    /// Clear only if the active credential is still `token`.
    ///
    /// A request issued under an older credential must not wipe one obtained
    /// by a login that completed while it was in flight.
    pub fn clear_if(&self, token: &str) -> bool {
        let mut inner = self.lock();
        if inner.token.as_deref() != Some(token) {
            return false;
        }
        inner.token = None;
        inner.generation += 1;
        self.storage.remove();
        true
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.lock().token.is_some()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
