use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::test_support::signed_in_gateway;

#[test]
fn overlapping_refetches_keep_second_calls_items() {
    let mut rooms: Provider<Vec<&str>> = Provider::new(ROOMS_FAILED);
    let first = rooms.begin();
    let second = rooms.begin();

    // Second call answers first, then the slower first call arrives.
    assert!(rooms.commit(second, Ok(vec!["B"])));
    assert!(!rooms.commit(first, Ok(vec!["A"])));

    assert_eq!(rooms.items(), ["B"]);
    assert!(!rooms.is_loading());
}

#[test]
fn stale_result_cannot_end_loading() {
    let mut rooms: Provider<Vec<u8>> = Provider::new(ROOMS_FAILED);
    let first = rooms.begin();
    let _second = rooms.begin();
    assert!(!rooms.commit(first, Ok(vec![1])));
    assert!(rooms.is_loading());
    assert!(rooms.items().is_empty());
}

#[test]
fn failure_keeps_previous_items() {
    let mut rooms: Provider<Vec<u8>> = Provider::new(ROOMS_FAILED);
    let ticket = rooms.begin();
    rooms.commit(ticket, Ok(vec![1, 2]));
    let ticket = rooms.begin();
    rooms.commit(ticket, Err(ApiError::rejected(500, "")));
    assert_eq!(rooms.items(), [1, 2]);
    assert_eq!(rooms.error(), Some(ROOMS_FAILED));
}

#[test]
fn success_clears_earlier_error() {
    let mut tx: Provider<Vec<u8>> = Provider::new(TRANSACTIONS_FAILED);
    let ticket = tx.begin();
    tx.commit(ticket, Err(ApiError::Timeout));
    assert!(tx.error().is_some());
    let ticket = tx.begin();
    tx.commit(ticket, Ok(vec![]));
    assert_eq!(tx.error(), None);
}

#[test]
fn cancelled_fetch_leaves_state_untouched() {
    let mut detail: Provider<String> = Provider::new(ROOM_FAILED);
    let ticket = detail.begin();
    detail.commit(ticket, Ok("room".to_owned()));
    let ticket = detail.begin();
    detail.commit(ticket, Err(ApiError::Cancelled));
    assert_eq!(detail.data().map(String::as_str), Some("room"));
    assert_eq!(detail.error(), None);
}

#[test]
fn reset_invalidates_in_flight_ticket() {
    let mut rooms: Provider<Vec<u8>> = Provider::new(ROOMS_FAILED);
    let ticket = rooms.begin();
    rooms.reset();
    assert!(!rooms.commit(ticket, Ok(vec![9])));
    assert!(rooms.items().is_empty());
}

#[test]
fn gateway_fetch_commits_rooms() {
    let (gateway, mock) = signed_in_gateway("T1");
    mock.respond(200, json!({ "rooms": [{ "id": "r1", "name": "Crew", "cost": 900 }] }));
    let mut rooms = Provider::new(ROOMS_FAILED);
    let ticket = rooms.begin();
    rooms.commit(ticket, block_on(gateway.list_rooms()));
    assert_eq!(rooms.items().len(), 1);
    assert_eq!(rooms.items()[0].name, "Crew");
}
