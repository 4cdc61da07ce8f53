use futures::executor::block_on;
use futures::future::{join, pending, ready};

use super::*;

#[test]
fn ready_work_beats_pending_deadline() {
    let out = block_on(with_deadline(ready(Ok::<_, ApiError>(7)), pending()));
    assert_eq!(out, Ok(7));
}

#[test]
fn elapsed_deadline_times_out_hung_work() {
    let out = block_on(with_deadline(pending::<Result<u8, ApiError>>(), ready(())));
    assert_eq!(out, Err(ApiError::Timeout));
}

#[test]
fn work_errors_pass_through() {
    let out = block_on(with_deadline(ready(Err::<u8, _>(ApiError::Unauthenticated)), pending()));
    assert_eq!(out, Err(ApiError::Unauthenticated));
}

#[test]
fn later_request_supersedes_earlier_one() {
    let slot = RequestSlot::new();
    let first = slot.run(pending::<Result<&str, ApiError>>());
    let second = slot.run(ready(Ok("fresh")));
    let (first, second) = block_on(join(first, second));
    assert_eq!(first, Err(ApiError::Cancelled));
    assert_eq!(second, Ok("fresh"));
}

#[test]
fn cancel_aborts_running_request() {
    let slot = RequestSlot::new();
    let canceller = slot.clone();
    let running = slot.run(pending::<Result<(), ApiError>>());
    let cancel = async move {
        canceller.cancel();
    };
    let (out, ()) = block_on(join(running, cancel));
    assert_eq!(out, Err(ApiError::Cancelled));
}

#[test]
fn cancel_on_idle_slot_is_noop() {
    let slot = RequestSlot::new();
    slot.cancel();
    assert_eq!(block_on(slot.run(ready(Ok::<_, ApiError>(1)))), Ok(1));
}
