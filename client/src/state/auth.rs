//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mirrors gateway auth events into a reactive signal. Route guards re-check
//! on every change, and the redirect listener watches `unauth_seq` so each
//! rejected credential triggers exactly one navigation to the login page.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use workflow::events::AuthEvent;
use workflow::session::SessionState;
use workflow::types::Session;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub session: SessionState,
    /// Whether the token store currently holds a credential.
    pub signed_in: bool,
    /// Bumped on every unauthenticated event.
    pub unauth_seq: u64,
}

impl AuthState {
    pub fn new(signed_in: bool) -> Self {
        Self {
            signed_in,
            ..Self::default()
        }
    }

    pub fn apply_event(&mut self, event: AuthEvent) {
        match event {
            AuthEvent::LoggedIn => {
                self.signed_in = true;
                self.session = SessionState::Idle;
            }
            AuthEvent::LoggedOut => {
                self.signed_in = false;
                self.session = SessionState::Idle;
            }
            AuthEvent::Unauthenticated => {
                self.signed_in = false;
                self.session = SessionState::Unauthenticated;
                self.unauth_seq += 1;
            }
        }
    }

    pub fn user(&self) -> Option<&Session> {
        self.session.user()
    }

    /// Whether the identity still has to be fetched. A failed fetch waits
    /// for an explicit retry.
    pub fn needs_session(&self) -> bool {
        self.signed_in && self.session == SessionState::Idle
    }

    pub fn session_error(&self) -> Option<&str> {
        if self.signed_in { self.session.error() } else { None }
    }

    pub fn display_name(&self) -> String {
        self.user().map_or_else(String::new, |user| user.display_name().to_owned())
    }

    /// Initial for the avatar chip.
    pub fn initial(&self) -> String {
        self.display_name()
            .chars()
            .next()
            .map_or_else(|| "?".to_owned(), |c| c.to_uppercase().collect())
    }
}
