//! Current-user resolution.
//!
//! The resolver turns `GET /auth/verify/` into a [`SessionState`]. It never
//! navigates: an `Unauthenticated` outcome is reported as state, and the
//! gateway's event tells the router-level listener to redirect.
//!
//! A successful identity is cached against the token store's generation, so
//! any login, logout, or 401 invalidates it without explicit bookkeeping.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::ApiError;
use crate::gateway::{Gateway, Transport};
use crate::types::Session;

/// Fallback when verification fails without a server message.
pub const VERIFY_FAILED: &str = "Failed to load your account";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Loading,
    Ready(Session),
    Failed(String),
    Unauthenticated,
}

impl SessionState {
    /// Map a verification outcome to a state.
    #[must_use]
    pub fn settle(result: Result<Session, ApiError>) -> Self {
        match result {
            Ok(session) => Self::Ready(session),
            Err(ApiError::Unauthenticated) => Self::Unauthenticated,
            Err(ApiError::Cancelled) => Self::Idle,
            Err(err) => Self::Failed(err.user_message(VERIFY_FAILED)),
        }
    }

    #[must_use]
    pub fn user(&self) -> Option<&Session> {
        match self {
            Self::Ready(session) => Some(session),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct Cached {
    generation: u64,
    session: Option<Session>,
}

/// Verifies the credential and caches the identity per credential generation.
#[derive(Clone, Debug)]
pub struct SessionResolver<T> {
    gateway: Gateway<T>,
    cache: Arc<Mutex<Cached>>,
}

impl<T: Transport> SessionResolver<T> {
    pub fn new(gateway: Gateway<T>) -> Self {
        Self {
            gateway,
            cache: Arc::new(Mutex::new(Cached::default())),
        }
    }

    #[must_use]
    pub fn gateway(&self) -> &Gateway<T> {
        &self.gateway
    }

    /// Identity cached for the current credential, if any.
    #[must_use]
    pub fn cached(&self) -> Option<Session> {
        let generation = self.gateway.tokens().generation();
        let cache = self.lock();
        if cache.generation == generation { cache.session.clone() } else { None }
    }

    /// State to show before [`SessionResolver::resolve`] completes.
    #[must_use]
    pub fn initial_state(&self) -> SessionState {
        self.cached().map_or(SessionState::Loading, SessionState::Ready)
    }

    /// Cached identity if still valid, otherwise a verification round trip.
    pub async fn resolve(&self) -> SessionState {
        if let Some(session) = self.cached() {
            return SessionState::Ready(session);
        }
        self.refetch().await
    }

    /// Always ask the server.
    pub async fn refetch(&self) -> SessionState {
        let generation = self.gateway.tokens().generation();
        let result = self.gateway.verify_session().await;
        if let Ok(session) = &result {
            // A login/logout during the request makes this identity stale.
            if self.gateway.tokens().generation() == generation {
                let mut cache = self.lock();
                cache.generation = generation;
                cache.session = Some(session.clone());
            } else {
                log::debug!("verified identity belongs to a replaced credential; not caching");
            }
        }
        SessionState::settle(result)
    }

    pub fn invalidate(&self) {
        self.lock().session = None;
    }

    fn lock(&self) -> MutexGuard<'_, Cached> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
