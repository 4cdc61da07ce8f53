//! Billing: payment history and the pay-your-share entry point.

use leptos::prelude::*;

use crate::components::payment_dialog::PaymentDialog;
use crate::components::top_bar::TopBar;
use crate::components::transaction_list::TransactionList;
use crate::net::ClientGateway;
use crate::net::api::{load_rooms, load_transactions};
use crate::state::rooms::{RoomsState, TransactionsState, payable_rooms, total_paid};
use crate::util::format::format_amount;

#[component]
pub fn BillingPage() -> impl IntoView {
    let gateway = expect_context::<ClientGateway>();
    let rooms = expect_context::<RwSignal<RoomsState>>();
    let transactions = expect_context::<RwSignal<TransactionsState>>();

    load_transactions(&gateway, transactions);
    // The pay dialog picks from the room list.
    if rooms.with_untracked(|r| r.data().is_none()) {
        load_rooms(&gateway, rooms);
    }

    let paying = RwSignal::new(false);
    let on_pay_close = Callback::new(move |()| paying.set(false));
    let retry = move |_| load_transactions(&gateway, transactions);
    let items = Signal::derive(move || transactions.with(|t| t.items().to_vec()));
    let has_payable = move || rooms.with(|r| !payable_rooms(r.items()).is_empty());

    view! {
        <div class="billing-page">
            <TopBar title="Billing"/>
            <header class="billing-page__header">
                <div>
                    <h1>"Billing"</h1>
                    <p class="billing-page__total">
                        "Total paid: " {move || transactions.with(|t| format_amount(total_paid(t.items())))}
                    </p>
                </div>
                <button class="btn btn--primary" disabled=move || !has_payable() on:click=move |_| paying.set(true)>
                    "Make a payment"
                </button>
            </header>
            {move || {
                transactions.with(|t| t.error().map(str::to_owned))
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
                when=move || !transactions.with(|t| t.is_loading() && t.data().is_none())
                fallback=|| view! { <p class="loading">"Loading transactions..."</p> }
            >
                <TransactionList transactions=items/>
            </Show>
            <Show when=move || paying.get()>
                <PaymentDialog on_close=on_pay_close/>
            </Show>
        </div>
    }
}
