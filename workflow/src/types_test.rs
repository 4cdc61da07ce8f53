use serde_json::json;

use super::*;

#[test]
fn room_cost_accepts_decimal_string() {
    let room: Room = serde_json::from_value(json!({
        "id": "a1b2",
        "name": "Family Netflix",
        "service": "netflix",
        "cost": "1500.00",
        "role": "owner",
        "payment_status": "paid",
        "member_count": 3
    }))
    .unwrap();
    assert!((room.cost - 1500.0).abs() < f64::EPSILON);
    assert_eq!(room.service, ServiceType::Netflix);
    assert!(room.is_owner());
    assert_eq!(room.payment_status, PaymentStatus::Paid);
}

#[test]
fn room_defaults_missing_optional_fields() {
    let room: Room = serde_json::from_value(json!({ "id": 7, "name": "x", "cost": 100 })).unwrap();
    assert_eq!(room.id, "7");
    assert_eq!(room.role, RoomRole::Member);
    assert_eq!(room.payment_status, PaymentStatus::Pending);
    assert_eq!(room.member_count, 0);
    assert_eq!(room.service, ServiceType::Other);
}

#[test]
fn garbage_cost_fails_to_decode() {
    let result = serde_json::from_value::<Room>(json!({ "id": "r", "name": "x", "cost": "lots" }));
    assert!(result.is_err());
}

#[test]
fn unknown_enum_values_fall_back() {
    let member: RoomMember = serde_json::from_value(json!({
        "user_id": "u1",
        "payment_status": "refunded",
        "join_date": "2024-01-01",
        "amount_due": "500"
    }))
    .unwrap();
    assert_eq!(member.payment_status, PaymentStatus::Unknown);
    assert_eq!(member.joined_at, "2024-01-01");
    assert_eq!(member.amount_due, Some(500.0));
}

#[test]
fn payment_summary_counts_members_by_status() {
    let detail: RoomDetail = serde_json::from_value(json!({
        "room_id": "r1",
        "name": "Music",
        "service_type": "spotify",
        "cost": 900,
        "members": [
            { "user_id": "a", "payment_status": "paid" },
            { "user_id": "b", "payment_status": "pending" },
            { "user_id": "c", "payment_status": "overdue" },
            { "user_id": "d", "payment_status": "paid", "amount_due": null }
        ],
        "member_count": 4
    }))
    .unwrap();
    assert_eq!(
        detail.payment_summary(),
        PaymentSummary {
            paid: 2,
            pending: 1,
            overdue: 1
        }
    );
    let room = detail.to_room();
    assert_eq!(room.id, "r1");
    assert_eq!(room.service, ServiceType::Spotify);
    assert_eq!(room.member_count, 4);
}

#[test]
fn transaction_reads_gateway_receipt_field() {
    let tx: Transaction = serde_json::from_value(json!({
        "id": 12,
        "phone_number": "254712345678",
        "amount": "500.00",
        "MpesaReceiptNumber": "QK123ABC",
        "status": "successful",
        "timestamp": "2024-03-01T10:00:00Z"
    }))
    .unwrap();
    assert_eq!(tx.id, "12");
    assert_eq!(tx.receipt_number.as_deref(), Some("QK123ABC"));
    assert_eq!(tx.status, TransactionStatus::Successful);
}

#[test]
fn charge_receipt_accepts_both_checkout_id_spellings() {
    let upper: ChargeReceipt = serde_json::from_value(json!({ "CheckoutRequestID": "ws_1" })).unwrap();
    let camel: ChargeReceipt = serde_json::from_value(json!({ "checkoutRequestId": "ws_2" })).unwrap();
    assert_eq!(upper.checkout_request_id.as_deref(), Some("ws_1"));
    assert_eq!(camel.checkout_request_id.as_deref(), Some("ws_2"));
}

#[test]
fn charge_request_uses_backend_field_names() {
    let body = serde_json::to_value(ChargeRequest {
        phone: "254712345678".to_owned(),
        amount: 500,
        room: "r1".to_owned(),
    })
    .unwrap();
    assert_eq!(body, json!({ "phone": "254712345678", "amount": 500, "room": "r1" }));
}

#[test]
fn service_slugs_round_trip_through_form_values() {
    for service in ServiceType::ALL {
        assert_eq!(ServiceType::from_slug(service.slug()), Some(service));
    }
    assert_eq!(ServiceType::from_slug("crunchyroll"), None);
    let body = serde_json::to_value(ServiceType::DisneyPlus).unwrap();
    assert_eq!(body, json!("disney+"));
}

#[test]
fn session_display_name_falls_back_to_id() {
    let session: Session = serde_json::from_value(json!({ "user_id": 42 })).unwrap();
    assert_eq!(session.display_name(), "42");
    let named: Session = serde_json::from_value(json!({ "user_id": "u", "username": "amina" })).unwrap();
    assert_eq!(named.display_name(), "amina");
}
