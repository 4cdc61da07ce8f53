//! Room detail: members, payment status, and room management.
//!
//! Owners can remove members or delete the room; members can leave or pay
//! their share. Destructive actions go through a confirmation dialog and
//! report their outcome as a toast.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use workflow::cancel::RequestSlot;
use workflow::forms::{DELETE_ROOM_FAILED, LEAVE_ROOM_FAILED, REMOVE_MEMBER_FAILED};
use workflow::guard::HOME_PATH;
use workflow::payment::per_member_share;
use workflow::provider::{Provider, ROOM_FAILED};
use workflow::types::{PaymentStatus, RoomDetail, RoomMember, RoomRole};

use crate::components::payment_dialog::PaymentDialog;
use crate::components::top_bar::TopBar;
use crate::net::ClientGateway;
use crate::net::api::{load_room_detail, load_rooms, run_action};
use crate::pages::redirect_signal;
use crate::state::notice::NoticeState;
use crate::state::rooms::RoomsState;
use crate::util::format::{format_amount, format_date, format_whole};

/// Action waiting for confirmation.
#[derive(Clone, Debug, PartialEq, Eq)]
enum PendingAction {
    Leave,
    Delete,
    Remove { user_id: String, username: String },
}

impl PendingAction {
    fn prompt(&self) -> String {
        match self {
            Self::Leave => "Leave this room? You will lose access to the shared account.".to_owned(),
            Self::Delete => "Delete this room for every member? This cannot be undone.".to_owned(),
            Self::Remove { username, .. } => format!("Remove {username} from this room?"),
        }
    }
}

fn status_class(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Paid => "badge badge--paid",
        PaymentStatus::Overdue => "badge badge--overdue",
        PaymentStatus::Pending | PaymentStatus::Unknown => "badge badge--pending",
    }
}

#[component]
pub fn RoomDetailPage() -> impl IntoView {
    let gateway = expect_context::<ClientGateway>();
    let rooms = expect_context::<RwSignal<RoomsState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let params = use_params_map();
    let redirect = redirect_signal();

    let room_id = Memo::new(move |_| params.with(|p| p.get("id").unwrap_or_default()));
    let detail = RwSignal::new(Provider::<RoomDetail>::new(ROOM_FAILED));
    let pending = RwSignal::new(None::<PendingAction>);
    let paying = RwSignal::new(false);

    let slot = RequestSlot::new();
    on_cleanup({
        let slot = slot.clone();
        move || slot.cancel()
    });

    let refetch = {
        let gateway = gateway.clone();
        let slot = slot.clone();
        move || load_room_detail(&gateway, &slot, room_id.get_untracked(), detail)
    };
    {
        let gateway = gateway.clone();
        Effect::new(move || load_room_detail(&gateway, &slot, room_id.get(), detail));
    }

    let confirm = {
        let gateway = gateway.clone();
        let refetch = refetch.clone();
        move |_| {
            let Some(action) = pending.get_untracked() else {
                return;
            };
            pending.set(None);
            let id = room_id.get_untracked();
            let gateway = gateway.clone();
            match action {
                PendingAction::Leave => run_action(
                    notices,
                    {
                        let gateway = gateway.clone();
                        async move { gateway.leave_room(&id).await }
                    },
                    "You have left the room",
                    LEAVE_ROOM_FAILED,
                    move || {
                        load_rooms(&gateway, rooms);
                        redirect.set(Some(HOME_PATH));
                    },
                ),
                PendingAction::Delete => run_action(
                    notices,
                    {
                        let gateway = gateway.clone();
                        async move { gateway.delete_room(&id).await }
                    },
                    "Room deleted",
                    DELETE_ROOM_FAILED,
                    move || {
                        load_rooms(&gateway, rooms);
                        redirect.set(Some(HOME_PATH));
                    },
                ),
                PendingAction::Remove { user_id, .. } => run_action(
                    notices,
                    async move { gateway.remove_member(&id, &user_id).await },
                    "Member removed",
                    REMOVE_MEMBER_FAILED,
                    refetch.clone(),
                ),
            }
        }
    };

    let is_owner = move || detail.with(|d| d.data().is_some_and(|room| room.user_role == RoomRole::Owner));
    let on_pay_close = Callback::new(move |()| paying.set(false));

    let member_row = move |member: RoomMember| {
        let member_is_owner = member.role == RoomRole::Owner;
        let action = PendingAction::Remove {
            user_id: member.user_id.clone(),
            username: member.username.clone(),
        };
        view! {
            <li class="member">
                <span class="member__avatar">{member.username.chars().next().map(|c| c.to_uppercase().to_string())}</span>
                <span class="member__name">{member.username.clone()}</span>
                <Show when=move || member_is_owner>
                    <span class="badge badge--owner">"Owner"</span>
                </Show>
                <span class=status_class(member.payment_status)>{member.payment_status.label()}</span>
                <span class="member__joined">{format!("Joined {}", format_date(&member.joined_at))}</span>
                {member.amount_due.map(|due| view! { <span class="member__due">{format_amount(due)}</span> })}
                <Show when=move || !member_is_owner && is_owner()>
                    <button
                        class="btn btn--danger btn--small"
                        on:click={
                            let action = action.clone();
                            move |_| pending.set(Some(action.clone()))
                        }
                    >
                        "Remove"
                    </button>
                </Show>
            </li>
        }
    };

    let body = move |room: RoomDetail| {
        let summary = room.payment_summary();
        let share = per_member_share(room.cost, room.member_count).map_or_else(|_| "-".to_owned(), format_whole);
        let owner = room.user_role == RoomRole::Owner;
        let credentials = room.account_email.clone().map(|email| (email, room.account_password.clone().unwrap_or_default()));
        view! {
            <section class="room-detail__header">
                <span class="room-detail__service">{room.service.label()}</span>
                <h1>{room.name.clone()}</h1>
                <p class="room-detail__description">{room.description.clone()}</p>
                <dl class="room-detail__facts">
                    <dt>"Monthly cost"</dt>
                    <dd>{format_amount(room.cost)}</dd>
                    <dt>"Share per member"</dt>
                    <dd>{share}</dd>
                    <dt>"Due date"</dt>
                    <dd>{format_date(&room.due_date).to_owned()}</dd>
                    <dt>"Owner"</dt>
                    <dd>{room.owner_username.clone()}</dd>
                    <dt>"Room ID"</dt>
                    <dd class="room-detail__id">{room.id.clone()}</dd>
                </dl>
                {credentials
                    .map(|(email, password)| {
                        view! {
                            <div class="room-detail__credentials">
                                <h3>"Shared account"</h3>
                                <p>"Email: " <code>{email}</code></p>
                                <p>"Password: " <code>{password}</code></p>
                            </div>
                        }
                    })}
                <div class="room-detail__actions">
                    {if owner {
                        view! {
                            <button class="btn btn--danger" on:click=move |_| pending.set(Some(PendingAction::Delete))>
                                "Delete room"
                            </button>
                        }
                            .into_any()
                    } else {
                        view! {
                            <button class="btn btn--primary" on:click=move |_| paying.set(true)>
                                "Pay share"
                            </button>
                            <button class="btn" on:click=move |_| pending.set(Some(PendingAction::Leave))>
                                "Leave room"
                            </button>
                        }
                            .into_any()
                    }}
                </div>
            </section>
            <section class="room-detail__summary">
                <span class="badge badge--paid">{format!("{} paid", summary.paid)}</span>
                <span class="badge badge--pending">{format!("{} pending", summary.pending)}</span>
                <span class="badge badge--overdue">{format!("{} overdue", summary.overdue)}</span>
            </section>
            <section class="room-detail__members">
                <h2>{format!("Members ({})", room.member_count)}</h2>
                <ul class="member-list">{room.members.into_iter().map(member_row).collect::<Vec<_>>()}</ul>
            </section>
        }
    };

    view! {
        <div class="room-detail">
            <TopBar title="Room"/>
            <a class="room-detail__back" href=HOME_PATH>"← Back to dashboard"</a>
            {move || {
                detail.with(|d| d.error().map(str::to_owned))
                    .map(|message| {
                        let retry = refetch.clone();
                        view! {
                            <div class="panel-error">
                                <p>{message}</p>
                                <button class="btn" on:click=move |_| retry()>"Retry"</button>
                            </div>
                        }
                    })
            }}
            {move || match detail.with(|d| d.data().cloned()) {
                Some(room) => body(room).into_any(),
                None if detail.with(Provider::is_loading) => {
                    view! { <p class="loading">"Loading room..."</p> }.into_any()
                }
                None => ().into_any(),
            }}
            {move || {
                pending.get()
                    .map(|action| {
                        view! {
                            <div class="dialog-backdrop" on:click=move |_| pending.set(None)>
                                <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                                    <h2>"Are you sure?"</h2>
                                    <p>{action.prompt()}</p>
                                    <div class="dialog__actions">
                                        <button class="btn" on:click=move |_| pending.set(None)>"Cancel"</button>
                                        <button class="btn btn--danger" on:click=confirm.clone()>"Confirm"</button>
                                    </div>
                                </div>
                            </div>
                        }
                    })
            }}
            {move || {
                (paying.get() && !is_owner())
                    .then(|| detail.with_untracked(|d| d.data().map(RoomDetail::to_room)))
                    .flatten()
                    .map(|room| view! { <PaymentDialog on_close=on_pay_close room=room/> })
            }}
        </div>
    }
}
