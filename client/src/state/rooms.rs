//! Room and transaction collections shared by the dashboard, billing, and
//! payment views.

#[cfg(test)]
#[path = "rooms_test.rs"]
mod rooms_test;

use workflow::payment::per_member_share;
use workflow::provider::{Provider, ROOMS_FAILED, TRANSACTIONS_FAILED};
use workflow::types::{PaymentStatus, Room, Transaction, TransactionStatus};

pub type RoomsState = Provider<Vec<Room>>;
pub type TransactionsState = Provider<Vec<Transaction>>;

pub fn rooms_state() -> RoomsState {
    Provider::new(ROOMS_FAILED)
}

pub fn transactions_state() -> TransactionsState {
    Provider::new(TRANSACTIONS_FAILED)
}

/// Rooms the user can pay into (joined, not owned).
pub fn payable_rooms(rooms: &[Room]) -> Vec<Room> {
    rooms.iter().filter(|room| !room.is_owner()).cloned().collect()
}

/// Header figures for the dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    pub owned: usize,
    pub joined: usize,
    /// Sum of the user's shares in joined rooms that are not yet paid.
    pub outstanding: u64,
}

pub fn dashboard_summary(rooms: &[Room]) -> DashboardSummary {
    rooms.iter().fold(DashboardSummary::default(), |mut summary, room| {
        if room.is_owner() {
            summary.owned += 1;
        } else {
            summary.joined += 1;
            if room.payment_status != PaymentStatus::Paid {
                summary.outstanding += per_member_share(room.cost, room.member_count).unwrap_or(0);
            }
        }
        summary
    })
}

/// Total of successful payments.
pub fn total_paid(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .filter(|tx| tx.status == TransactionStatus::Successful)
        .map(|tx| tx.amount)
        .sum()
}

pub fn transaction_status_label(status: TransactionStatus) -> &'static str {
    match status {
        TransactionStatus::Pending => "Pending",
        TransactionStatus::Successful => "Completed",
        TransactionStatus::Failed => "Failed",
        TransactionStatus::Unknown => "Unknown",
    }
}

/// Newest first; timestamps are ISO-8601 so they sort lexically.
pub fn sorted_transactions(transactions: &[Transaction]) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sorted
}
