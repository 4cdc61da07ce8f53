use super::*;
use workflow::events::AuthEvent;

#[test]
fn redirects_once_per_unauthenticated_event() {
    let mut state = AuthState::new(true);
    state.apply_event(AuthEvent::Unauthenticated);
    assert!(should_redirect_unauth(0, &state, "/dashboard"));
    assert!(!should_redirect_unauth(1, &state, "/dashboard"));
}

#[test]
fn no_redirect_without_event() {
    let state = AuthState::new(true);
    assert!(!should_redirect_unauth(0, &state, "/billing"));
}

#[test]
fn no_redirect_from_public_pages() {
    let mut state = AuthState::new(false);
    state.apply_event(AuthEvent::Unauthenticated);
    assert!(!should_redirect_unauth(0, &state, "/auth/login"));
    assert!(!should_redirect_unauth(0, &state, "/"));
}

#[test]
fn logout_never_triggers_redirect_listener() {
    let mut state = AuthState::new(true);
    state.apply_event(AuthEvent::LoggedOut);
    assert!(!should_redirect_unauth(0, &state, "/room/r1"));
}
