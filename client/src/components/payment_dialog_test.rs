use super::*;

#[test]
fn idle_shows_no_status() {
    assert_eq!(status_line(&PaymentState::Idle), None);
}

#[test]
fn failure_shows_gateway_message() {
    let state = PaymentState::Failed {
        at_ms: 0,
        message: "Insufficient balance".to_owned(),
    };
    let (class, message) = status_line(&state).unwrap();
    assert!(class.ends_with("--error"));
    assert_eq!(message, "Insufficient balance");
}

#[test]
fn success_tells_member_to_check_phone() {
    let state = PaymentState::Success {
        at_ms: 0,
        checkout_request_id: Some("ws_CO_1".to_owned()),
    };
    let (_, message) = status_line(&state).unwrap();
    assert!(message.contains("Check your phone"));
}
