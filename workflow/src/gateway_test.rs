use std::sync::{Arc, Mutex};

use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::test_support::{TEST_BASE, gateway, signed_in_gateway};

#[derive(Debug, serde::Deserialize, PartialEq)]
struct Echo {
    ok: bool,
}

fn record_events(gateway: &Gateway<crate::test_support::MockTransport>) -> Arc<Mutex<Vec<AuthEvent>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    gateway.events().subscribe(move |event| sink.lock().unwrap().push(event));
    seen
}

#[test]
fn protected_call_attaches_bearer_header() {
    let (gateway, mock) = signed_in_gateway("T1");
    mock.respond(200, json!({ "ok": true }));
    let out: Echo = block_on(gateway.call(&Endpoint::ListRooms, None)).unwrap();
    assert_eq!(out, Echo { ok: true });

    let request = mock.last_request().unwrap();
    assert_eq!(request.authorization().as_deref(), Some("Bearer T1"));
    assert_eq!(request.url, format!("{TEST_BASE}/room/list/"));
    assert_eq!(request.method, Method::Get);
}

#[test]
fn public_call_omits_credential_even_when_signed_in() {
    let (gateway, mock) = signed_in_gateway("T1");
    mock.respond(200, json!({ "ok": true }));
    let _: Echo = block_on(gateway.call(&Endpoint::Login, Some(json!({})))).unwrap();
    assert_eq!(mock.last_request().unwrap().bearer, None);
}

#[test]
fn protected_call_without_token_never_hits_network() {
    let (gateway, mock) = gateway();
    let seen = record_events(&gateway);
    let err = block_on(gateway.call::<Echo>(&Endpoint::ListRooms, None)).unwrap_err();
    assert_eq!(err, ApiError::Unauthenticated);
    assert!(mock.requests().is_empty());
    assert_eq!(*seen.lock().unwrap(), vec![AuthEvent::Unauthenticated]);
}

#[test]
fn unauthorized_response_clears_token_and_emits_event() {
    let (gateway, mock) = signed_in_gateway("expired");
    let seen = record_events(&gateway);
    mock.respond(401, json!({ "error": "Token expired" }));
    let err = block_on(gateway.call::<Echo>(&Endpoint::VerifySession, None)).unwrap_err();
    assert!(err.is_unauthenticated());
    assert!(!gateway.tokens().is_authenticated());
    assert_eq!(*seen.lock().unwrap(), vec![AuthEvent::Unauthenticated]);
}

#[test]
fn unauthorized_on_public_endpoint_is_a_rejection() {
    let (gateway, mock) = gateway();
    let seen = record_events(&gateway);
    mock.respond(401, json!({ "error": "Invalid credentials" }));
    let err = block_on(gateway.call::<Echo>(&Endpoint::Login, Some(json!({})))).unwrap_err();
    assert_eq!(err.user_message("Login failed"), "Invalid credentials");
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn stale_unauthorized_does_not_sign_out_newer_session() {
    let (gateway, _mock) = signed_in_gateway("old");
    let seen = record_events(&gateway);
    // Simulate: request under "old" is answered 401 after a fresh login.
    gateway.tokens().set("new");
    gateway.reject_credential("old");
    assert_eq!(gateway.tokens().get().as_deref(), Some("new"));
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn unauthorized_after_logout_still_notifies() {
    let (gateway, _mock) = signed_in_gateway("old");
    let seen = record_events(&gateway);
    gateway.logout();
    gateway.reject_credential("old");
    assert_eq!(
        *seen.lock().unwrap(),
        vec![AuthEvent::LoggedOut, AuthEvent::Unauthenticated]
    );
}

#[test]
fn server_error_carries_extracted_message() {
    let (gateway, mock) = signed_in_gateway("T1");
    mock.respond(500, json!({ "error": "database unavailable" }));
    let err = block_on(gateway.call::<Echo>(&Endpoint::ListRooms, None)).unwrap_err();
    assert!(matches!(err, ApiError::Rejected { status: 500, .. }));
    assert_eq!(err.user_message("Failed to fetch rooms"), "database unavailable");
}

#[test]
fn transport_failure_is_not_unauthenticated() {
    let (gateway, mock) = signed_in_gateway("T1");
    mock.fail(TransportError::Network("connection refused".to_owned()));
    let err = block_on(gateway.call::<Echo>(&Endpoint::ListRooms, None)).unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert!(gateway.tokens().is_authenticated());
}

#[test]
fn empty_success_body_decodes_as_unit() {
    let (gateway, mock) = signed_in_gateway("T1");
    mock.respond_raw(204, "");
    block_on(gateway.call::<()>(&Endpoint::DeleteRoom("r1".to_owned()), None)).unwrap();
}

#[test]
fn malformed_success_body_is_decode_error() {
    let (gateway, mock) = signed_in_gateway("T1");
    mock.respond_raw(200, "not json");
    let err = block_on(gateway.call::<Echo>(&Endpoint::ListRooms, None)).unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn sign_in_stores_token_and_notifies() {
    let (gateway, _mock) = gateway();
    let seen = record_events(&gateway);
    gateway.sign_in("T9");
    assert_eq!(gateway.tokens().get().as_deref(), Some("T9"));
    assert_eq!(*seen.lock().unwrap(), vec![AuthEvent::LoggedIn]);
}
