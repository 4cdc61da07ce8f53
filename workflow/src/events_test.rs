use std::sync::{Arc, Mutex};

use super::*;

fn recorder(events: &AuthEvents) -> (SubscriptionId, Arc<Mutex<Vec<AuthEvent>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let id = events.subscribe(move |event| sink.lock().unwrap().push(event));
    (id, seen)
}

#[test]
fn emit_reaches_every_subscriber() {
    let events = AuthEvents::default();
    let (_, first) = recorder(&events);
    let (_, second) = recorder(&events);
    events.emit(AuthEvent::Unauthenticated);
    assert_eq!(*first.lock().unwrap(), vec![AuthEvent::Unauthenticated]);
    assert_eq!(*second.lock().unwrap(), vec![AuthEvent::Unauthenticated]);
}

#[test]
fn unsubscribed_listener_stops_receiving() {
    let events = AuthEvents::default();
    let (id, seen) = recorder(&events);
    events.emit(AuthEvent::LoggedIn);
    events.unsubscribe(id);
    events.emit(AuthEvent::LoggedOut);
    assert_eq!(*seen.lock().unwrap(), vec![AuthEvent::LoggedIn]);
}

#[test]
fn clones_share_subscribers() {
    let events = AuthEvents::default();
    let (_, seen) = recorder(&events);
    events.clone().emit(AuthEvent::LoggedOut);
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[test]
fn listener_may_emit_reentrantly() {
    let events = AuthEvents::default();
    let inner = events.clone();
    let (_, seen) = recorder(&events);
    events.subscribe(move |event| {
        if event == AuthEvent::Unauthenticated {
            inner.emit(AuthEvent::LoggedOut);
        }
    });
    events.emit(AuthEvent::Unauthenticated);
    assert_eq!(
        *seen.lock().unwrap(),
        vec![AuthEvent::Unauthenticated, AuthEvent::LoggedOut]
    );
}
