//! Dashboard page listing the user's rooms.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. It refetches the rooms provider
//! on mount and hosts the create, join, and pay dialogs; each dialog
//! refetches the collection it changed.

use leptos::prelude::*;
use workflow::types::Room;

use crate::components::create_room_dialog::CreateRoomDialog;
use crate::components::join_room_dialog::JoinRoomDialog;
use crate::components::payment_dialog::PaymentDialog;
use crate::components::room_card::RoomCard;
use crate::components::top_bar::TopBar;
use crate::net::ClientGateway;
use crate::net::api::load_rooms;
use crate::state::auth::AuthState;
use crate::state::rooms::{RoomsState, dashboard_summary};
use crate::util::format::format_whole;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let gateway = expect_context::<ClientGateway>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let rooms = expect_context::<RwSignal<RoomsState>>();

    load_rooms(&gateway, rooms);

    let show_create = RwSignal::new(false);
    let show_join = RwSignal::new(false);
    let pay_room = RwSignal::new(None::<Room>);

    let on_create_close = Callback::new(move |()| show_create.set(false));
    let on_join_close = Callback::new(move |()| show_join.set(false));
    let on_pay_close = Callback::new(move |()| pay_room.set(None));
    let on_pay = Callback::new(move |room: Room| pay_room.set(Some(room)));
    let retry = move |_| load_rooms(&gateway, rooms);

    let summary = Memo::new(move |_| rooms.with(|r| dashboard_summary(r.items())));
    let greeting = move || {
        let name = auth.with(AuthState::display_name);
        if name.is_empty() { "Welcome back".to_owned() } else { format!("Welcome back, {name}") }
    };

    view! {
        <div class="dashboard-page">
            <TopBar title="Dashboard"/>
            <header class="dashboard-page__header">
                <h1>{greeting}</h1>
                <div class="dashboard-page__actions">
                    <button class="btn btn--primary" on:click=move |_| show_create.set(true)>
                        "+ Create Room"
                    </button>
                    <button class="btn" on:click=move |_| show_join.set(true)>
                        "Join Room"
                    </button>
                </div>
            </header>

            <section class="dashboard-summary">
                <div class="dashboard-summary__item">
                    <span class="dashboard-summary__value">{move || summary.get().owned}</span>
                    <span class="dashboard-summary__label">"Rooms you own"</span>
                </div>
                <div class="dashboard-summary__item">
                    <span class="dashboard-summary__value">{move || summary.get().joined}</span>
                    <span class="dashboard-summary__label">"Rooms joined"</span>
                </div>
                <div class="dashboard-summary__item">
                    <span class="dashboard-summary__value">{move || format_whole(summary.get().outstanding)}</span>
                    <span class="dashboard-summary__label">"Outstanding"</span>
                </div>
            </section>

            {move || {
                rooms.with(|r| r.error().map(str::to_owned))
                    .map(|message| {
                        view! {
                            <div class="panel-error">
                                <p>{message}</p>
                                <button class="btn" on:click=retry.clone()>"Retry"</button>
                            </div>
                        }
                    })
            }}

            <Show
                when=move || !rooms.with(|r| r.is_loading() && r.data().is_none())
                fallback=|| view! { <p class="loading">"Loading rooms..."</p> }
            >
                <Show
                    when=move || rooms.with(|r| !r.items().is_empty())
                    fallback=move || {
                        view! {
                            <Show when=move || rooms.with(|r| r.data().is_some())>
                                <p class="empty-state">"No rooms yet. Create one or join with a room ID."</p>
                            </Show>
                        }
                    }
                >
                    <div class="dashboard-page__cards">
                        <For
                            each=move || rooms.with(|r| r.items().to_vec())
                            key=|room| (room.id.clone(), room.payment_status, room.member_count)
                            children=move |room: Room| view! { <RoomCard room=room on_pay=on_pay/> }
                        />
                    </div>
                </Show>
            </Show>

            <Show when=move || show_create.get()>
                <CreateRoomDialog on_close=on_create_close/>
            </Show>
            <Show when=move || show_join.get()>
                <JoinRoomDialog on_close=on_join_close/>
            </Show>
            {move || pay_room.get().map(|room| view! { <PaymentDialog on_close=on_pay_close room=room/> })}
        </div>
    }
}
