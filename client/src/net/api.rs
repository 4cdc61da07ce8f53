//! Gateway calls wired into reactive state.
//!
//! Client-side (csr): calls are spawned with `spawn_local` and their outcomes
//! committed into signals. Native builds compile the same functions as no-ops
//! so components and tests link without a browser.
//!
//! ERROR HANDLING
//! ==============
//! Collection fetches record failures on their provider (full-panel error).
//! One-shot actions report through a toast. `Unauthenticated` is never shown
//! here; the redirect listener owns that outcome.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::future::Future;

use leptos::prelude::*;
use workflow::ApiError;
use workflow::cancel::RequestSlot;
use workflow::provider::Provider;
use workflow::types::RoomDetail;

use super::{ClientGateway, ClientSession};
use crate::state::auth::AuthState;
#[cfg(any(test, feature = "csr"))]
use crate::state::notice::NoticeKind;
use crate::state::notice::NoticeState;
use crate::state::rooms::{RoomsState, TransactionsState};

/// Toast to show for a one-shot action outcome, if any.
#[cfg(any(test, feature = "csr"))]
fn action_notice<T>(result: &Result<T, ApiError>, success: &str, fallback: &str) -> Option<(NoticeKind, String)> {
    match result {
        Ok(_) => Some((NoticeKind::Success, success.to_owned())),
        Err(ApiError::Unauthenticated | ApiError::Cancelled) => None,
        Err(err) => Some((NoticeKind::Error, err.user_message(fallback))),
    }
}

/// Start a ticketed fetch into `state`. Only the latest fetch commits.
fn fetch_into<D, F, Fut>(state: RwSignal<Provider<D>>, fetch: F)
where
    D: Send + Sync + 'static,
    F: FnOnce() -> Fut + 'static,
    Fut: Future<Output = Result<D, ApiError>> + 'static,
{
    let Some(ticket) = state.try_update(Provider::begin) else {
        return;
    };
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        let result = fetch().await;
        state.try_update(|provider| provider.commit(ticket, result));
    });
    #[cfg(not(feature = "csr"))]
    {
        let _ = (ticket, fetch);
    }
}

pub fn load_rooms(gateway: &ClientGateway, rooms: RwSignal<RoomsState>) {
    let gateway = gateway.clone();
    fetch_into(rooms, move || async move { gateway.list_rooms().await });
}

pub fn load_transactions(gateway: &ClientGateway, transactions: RwSignal<TransactionsState>) {
    let gateway = gateway.clone();
    fetch_into(transactions, move || async move { gateway.transactions().await });
}

/// Load one room through `slot`, aborting the previous room's request.
pub fn load_room_detail(
    gateway: &ClientGateway,
    slot: &RequestSlot,
    room_id: String,
    detail: RwSignal<Provider<RoomDetail>>,
) {
    let gateway = gateway.clone();
    let slot = slot.clone();
    fetch_into(detail, move || async move { slot.run(gateway.room_detail(&room_id)).await });
}

/// Resolve the signed-in identity into `auth.session`.
pub fn load_session(resolver: &ClientSession, auth: RwSignal<AuthState>) {
    auth.update(|state| state.session = resolver.initial_state());
    #[cfg(feature = "csr")]
    {
        let resolver = resolver.clone();
        leptos::task::spawn_local(async move {
            let session = resolver.resolve().await;
            auth.try_update(|state| state.session = session);
        });
    }
}

/// Run a one-shot action, toast its outcome, and call `on_success` after a
/// success (typically a provider refetch).
pub fn run_action<T, Fut, S>(
    notices: RwSignal<NoticeState>,
    action: Fut,
    success: &'static str,
    fallback: &'static str,
    on_success: S,
) where
    T: 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
    S: FnOnce() + 'static,
{
    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        let result = action.await;
        if let Some((kind, message)) = action_notice(&result, success, fallback) {
            notices.update(|n| {
                n.push(kind, message);
            });
        }
        if result.is_ok() {
            on_success();
        }
    });
    #[cfg(not(feature = "csr"))]
    {
        let _ = (notices, action, success, fallback, on_success);
    }
}
