//! Dashboard card for one room.

use leptos::prelude::*;
use workflow::payment::per_member_share;
use workflow::types::{PaymentStatus, Room};

use crate::util::format::{format_amount, format_whole};

fn status_class(room: &Room) -> &'static str {
    if room.is_owner() {
        return "room-card__badge room-card__badge--owner";
    }
    match room.payment_status {
        PaymentStatus::Paid => "room-card__badge room-card__badge--paid",
        PaymentStatus::Overdue => "room-card__badge room-card__badge--overdue",
        _ => "room-card__badge room-card__badge--pending",
    }
}

#[component]
pub fn RoomCard(room: Room, #[prop(optional)] on_pay: Option<Callback<Room>>) -> impl IntoView {
    let href = format!("/room/{}", room.id);
    let share = per_member_share(room.cost, room.member_count)
        .map_or_else(|_| "—".to_owned(), format_whole);
    let badge = if room.is_owner() { "Owner".to_owned() } else { room.payment_status.label().to_owned() };
    let badge_class = status_class(&room);
    let payable = !room.is_owner();
    let pay_room = room.clone();

    view! {
        <a class="room-card" href=href>
            <span class="room-card__service">{room.service.label()}</span>
            <span class="room-card__name">{room.name.clone()}</span>
            <span class=badge_class>{badge}</span>
            <span class="room-card__cost">{format!("{} / month", format_amount(room.cost))}</span>
            <span class="room-card__share">{format!("Your share: {share}")}</span>
            <span class="room-card__members">{format!("{} members", room.member_count)}</span>
            <Show when=move || payable && on_pay.is_some()>
                <button
                    class="btn btn--primary room-card__pay"
                    on:click={
                        let pay_room = pay_room.clone();
                        move |ev: leptos::ev::MouseEvent| {
                            ev.prevent_default();
                            ev.stop_propagation();
                            if let Some(on_pay) = on_pay {
                                on_pay.run(pay_room.clone());
                            }
                        }
                    }
                >
                    "Pay share"
                </button>
            </Show>
        </a>
    }
}
