//! Table of M-Pesa transactions, newest first.

use leptos::prelude::*;
use workflow::types::{Transaction, TransactionStatus};

use crate::state::rooms::{sorted_transactions, transaction_status_label};
use crate::util::format::{format_amount, format_date, mask_phone};

fn status_class(status: TransactionStatus) -> &'static str {
    match status {
        TransactionStatus::Successful => "tx__status tx__status--paid",
        TransactionStatus::Failed => "tx__status tx__status--failed",
        TransactionStatus::Pending | TransactionStatus::Unknown => "tx__status tx__status--pending",
    }
}

#[component]
pub fn TransactionList(#[prop(into)] transactions: Signal<Vec<Transaction>>) -> impl IntoView {
    let rows = move || transactions.with(|txs| sorted_transactions(txs));

    view! {
        <Show
            when=move || transactions.with(|txs| !txs.is_empty())
            fallback=|| view! { <p class="empty-state">"No transactions yet."</p> }
        >
            <table class="tx">
                <thead>
                    <tr>
                        <th>"Date"</th>
                        <th>"Description"</th>
                        <th>"Receipt"</th>
                        <th>"Phone"</th>
                        <th>"Amount"</th>
                        <th>"Status"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=rows
                        key=|tx| tx.id.clone()
                        children=|tx: Transaction| {
                            view! {
                                <tr>
                                    <td>{format_date(&tx.timestamp).to_owned()}</td>
                                    <td>{tx.description.clone()}</td>
                                    <td>{tx.receipt_number.clone().unwrap_or_else(|| "-".to_owned())}</td>
                                    <td>{mask_phone(&tx.phone_number)}</td>
                                    <td>{format_amount(tx.amount)}</td>
                                    <td class=status_class(tx.status)>{transaction_status_label(tx.status)}</td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </Show>
    }
}
