//! Session lifecycle notifications.
//!
//! DESIGN
//! ======
//! Data accessors never navigate. The gateway publishes an
//! [`AuthEvent::Unauthenticated`] when a credential is missing or rejected and
//! a router-level subscriber decides what to do with it.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Something that happened to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthEvent {
    /// A credential was stored after a successful login.
    LoggedIn,
    /// The user asked to log out.
    LoggedOut,
    /// A protected call found no credential or the server rejected it.
    Unauthenticated,
}

type Listener = Arc<dyn Fn(AuthEvent) + Send + Sync>;

/// Handle returned by [`AuthEvents::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionId(u64);

/// Broadcast channel for [`AuthEvent`]s. Clones share subscribers.
#[derive(Clone, Default)]
pub struct AuthEvents {
    listeners: Arc<Mutex<Vec<(SubscriptionId, Listener)>>>,
    next_id: Arc<AtomicU64>,
}

impl std::fmt::Debug for AuthEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthEvents")
            .field("listeners", &self.len())
            .finish()
    }
}

impl AuthEvents {
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(AuthEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(existing, _)| *existing != id);
    }

    /// Deliver `event` to every subscriber.
    ///
    /// Listeners run outside the lock so they may subscribe or emit themselves.
    pub fn emit(&self, event: AuthEvent) {
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        log::debug!("auth event {event:?} -> {} listener(s)", listeners.len());
        for listener in listeners {
            listener(event);
        }
    }

    fn len(&self) -> usize {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}
