//! Pay-your-share dialog driving an STK push.
//!
//! The dialog owns one [`PaymentAttempt`]. Submitting moves it to
//! `Processing`; the charge outcome and the close/reset timers are applied
//! from spawned tasks, so a closed dialog simply drops the late updates.

#[cfg(test)]
#[path = "payment_dialog_test.rs"]
mod payment_dialog_test;

use leptos::prelude::*;
use workflow::payment::{PAYMENT_FAILED, PaymentAttempt, PaymentState};
use workflow::types::Room;

use crate::net::ClientGateway;
use crate::state::auth::AuthState;
use crate::state::notice::NoticeState;
use crate::state::rooms::{RoomsState, TransactionsState, payable_rooms};
use crate::util::format::{format_amount, format_whole};

/// Poll the attempt's timers until it closes or resets.
#[cfg(feature = "csr")]
fn drive_timers(attempt: RwSignal<PaymentAttempt>, on_close: Callback<()>) {
    use workflow::payment::TickOutcome;

    use crate::util::clock::{now_ms, sleep_ms};

    leptos::task::spawn_local(async move {
        loop {
            let Some(wait) = attempt.try_with_untracked(|a| a.next_deadline(now_ms())).flatten() else {
                return;
            };
            sleep_ms(wait).await;
            match attempt.try_update(|a| a.tick(now_ms())) {
                Some(TickOutcome::Close) => {
                    on_close.run(());
                    return;
                }
                Some(TickOutcome::Reset) | None => return,
                Some(TickOutcome::Wait) => {}
            }
        }
    });
}

fn status_line(state: &PaymentState) -> Option<(&'static str, String)> {
    match state {
        PaymentState::Idle => None,
        PaymentState::Processing { .. } => Some((
            "payment__status payment__status--pending",
            "Sending payment request...".to_owned(),
        )),
        PaymentState::Success { .. } => Some((
            "payment__status payment__status--success",
            workflow::payment::PAYMENT_SENT.to_owned(),
        )),
        PaymentState::Failed { message, .. } => Some(("payment__status payment__status--error", message.clone())),
    }
}

#[component]
pub fn PaymentDialog(on_close: Callback<()>, #[prop(optional)] room: Option<Room>) -> impl IntoView {
    let gateway = expect_context::<ClientGateway>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let rooms = expect_context::<RwSignal<RoomsState>>();
    let transactions = expect_context::<RwSignal<TransactionsState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();

    let saved_phone = auth.with_untracked(|a| a.user().and_then(|user| user.phone_number.clone()).unwrap_or_default());
    let mut initial = PaymentAttempt::with_phone(&saved_phone);
    if let Some(room) = room {
        if let Err(err) = initial.select_room(room) {
            log::debug!("preselected room rejected: {err}");
        }
    }
    let attempt = RwSignal::new(initial);
    let form_error = RwSignal::new(None::<String>);
    let options = Memo::new(move |_| rooms.with(|r| payable_rooms(r.items())));

    let on_room = move |ev: leptos::ev::Event| {
        let id = event_target_value(&ev);
        let Some(room) = options.with_untracked(|rooms| rooms.iter().find(|r| r.id == id).cloned()) else {
            return;
        };
        let result = attempt.try_update(|a| a.select_room(room));
        form_error.set(match result {
            Some(Err(err)) => Some(err.user_message(PAYMENT_FAILED)),
            _ => None,
        });
    };

    let submit = Callback::new(move |()| {
        let now = crate::util::clock::now_ms();
        let request = match attempt.try_update(|a| a.begin_submit(now)) {
            Some(Ok(request)) => request,
            Some(Err(err)) => {
                form_error.set(Some(err.user_message(PAYMENT_FAILED)));
                return;
            }
            None => return,
        };
        form_error.set(None);
        #[cfg(feature = "csr")]
        {
            use workflow::payment::{PAYMENT_SENT, SUBMIT_TIMEOUT, submit_charge};

            use crate::util::clock::{now_ms, sleep};

            let gateway = gateway.clone();
            leptos::task::spawn_local(async move {
                let result = submit_charge(&gateway, &request, sleep(SUBMIT_TIMEOUT)).await;
                let refetch = attempt.try_update(|a| a.resolve(result, now_ms())).unwrap_or(false);
                if refetch {
                    notices.update(|n| {
                        n.success(PAYMENT_SENT);
                    });
                    crate::net::api::load_transactions(&gateway, transactions);
                }
                drive_timers(attempt, on_close);
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (request, &gateway, transactions, notices);
        }
    });

    let selected_id = move || attempt.with(|a| a.room().map(|r| r.id.clone()).unwrap_or_default());
    let amount = move || {
        attempt.with(|a| match a.amount() {
            Some(Ok(share)) => format_whole(share),
            Some(Err(err)) => err.user_message(PAYMENT_FAILED),
            None => "Select a room".to_owned(),
        })
    };
    let processing = move || attempt.with(PaymentAttempt::is_processing);

    view! {
        <div
            class="dialog-backdrop"
            on:click=move |_| {
                if !processing() {
                    on_close.run(());
                }
            }
        >
            <form
                class="dialog payment"
                on:click=move |ev| ev.stop_propagation()
                on:submit=move |ev| {
                    ev.prevent_default();
                    submit.run(());
                }
            >
                <h2>"Pay your share"</h2>
                <label class="dialog__label">
                    "Room"
                    <select class="dialog__input" prop:value=selected_id disabled=processing on:change=on_room>
                        <option value="">"Select a room"</option>
                        <For
                            each=move || options.get()
                            key=|room| room.id.clone()
                            children=move |room: Room| {
                                let label = format!("{} ({})", room.name, format_amount(room.cost));
                                view! { <option value=room.id.clone()>{label}</option> }
                            }
                        />
                    </select>
                </label>
                <p class="payment__amount">"Amount: " {amount}</p>
                <label class="dialog__label">
                    "M-Pesa phone number"
                    <input
                        class="dialog__input"
                        type="tel"
                        placeholder="0712345678"
                        disabled=processing
                        prop:value=move || attempt.with(|a| a.phone().to_owned())
                        on:input=move |ev| attempt.update(|a| a.set_phone(&event_target_value(&ev)))
                    />
                </label>
                {move || form_error.get().map(|message| view! { <p class="dialog__danger">{message}</p> })}
                {move || {
                    attempt.with(|a| status_line(a.state()))
                        .map(|(class, message)| view! { <p class=class>{message}</p> })
                }}
                <div class="dialog__actions">
                    <button class="btn" type="button" disabled=processing on:click=move |_| on_close.run(())>
                        "Close"
                    </button>
                    <button
                        class="btn btn--primary"
                        type="submit"
                        disabled=move || !attempt.with(PaymentAttempt::can_submit)
                    >
                        {move || if processing() { "Processing..." } else { "Pay now" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
