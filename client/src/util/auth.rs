//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The gateway never navigates. It emits auth events; `bridge_auth_events`
//! mirrors them into the `AuthState` signal and `install_unauth_redirect`
//! turns each unauthenticated event into a single navigation to login.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use workflow::guard::{LOGIN_PATH, is_public_path};

use crate::net::ClientGateway;
use crate::state::auth::AuthState;

/// Whether a new unauthenticated event should send the user to login.
pub fn should_redirect_unauth(last_seen_seq: u64, state: &AuthState, path: &str) -> bool {
    state.unauth_seq > last_seen_seq && !is_public_path(path)
}

/// Mirror gateway auth events into `auth` until the calling owner is disposed.
pub fn bridge_auth_events(gateway: &ClientGateway, auth: RwSignal<AuthState>) {
    let id = gateway.events().subscribe(move |event| {
        auth.try_update(|state| state.apply_event(event));
    });
    let events = gateway.events().clone();
    on_cleanup(move || events.unsubscribe(id));
}

/// Redirect to the login page after each unauthenticated event.
///
/// Must be installed inside the router so `navigate` and `pathname` are live.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, pathname: Memo<String>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let last_seen = StoredValue::new(auth.get_untracked().unauth_seq);
    Effect::new(move || {
        let state = auth.get();
        if should_redirect_unauth(last_seen.get_value(), &state, &pathname.get_untracked()) {
            log::info!("session rejected; redirecting to {LOGIN_PATH}");
            navigate(
                LOGIN_PATH,
                NavigateOptions {
                    replace: true,
                    ..NavigateOptions::default()
                },
            );
        }
        last_seen.set_value(state.unauth_seq);
    });
}
