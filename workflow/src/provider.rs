//! Collection state for rooms, room detail, and transactions.
//!
//! DESIGN
//! ======
//! Every fetch takes a [`FetchTicket`]. Only the most recently issued ticket
//! may commit, so overlapping refetches resolve to the last one *started*
//! regardless of arrival order. Failures keep the previous data and surface a
//! message; nothing is retried automatically.

#[cfg(test)]
#[path = "provider_test.rs"]
mod provider_test;

use crate::error::ApiError;

/// Fallback messages per collection.
pub const ROOMS_FAILED: &str = "Failed to fetch rooms";
pub const ROOM_FAILED: &str = "Failed to load room details";
pub const TRANSACTIONS_FAILED: &str = "Failed to fetch transactions";

/// Proof that a fetch was started; see [`Provider::commit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Clone, Debug, PartialEq)]
pub struct Provider<D> {
    data: Option<D>,
    loading: bool,
    error: Option<String>,
    issued: u64,
    failure_message: &'static str,
}

impl<D> Provider<D> {
    /// Empty provider; `failure_message` is shown when the server gives none.
    #[must_use]
    pub fn new(failure_message: &'static str) -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            issued: 0,
            failure_message,
        }
    }

    /// Start a fetch. Any earlier ticket becomes stale.
    pub fn begin(&mut self) -> FetchTicket {
        self.issued += 1;
        self.loading = true;
        FetchTicket(self.issued)
    }

    /// Apply a fetch outcome. Returns `false` when the ticket is stale and the
    /// outcome was discarded.
    pub fn commit(&mut self, ticket: FetchTicket, result: Result<D, ApiError>) -> bool {
        if ticket.0 != self.issued {
            log::debug!("discarding stale fetch {} (latest {})", ticket.0, self.issued);
            return false;
        }
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(ApiError::Cancelled) => {}
            Err(err) => {
                log::warn!("{}: {err}", self.failure_message);
                self.error = Some(err.user_message(self.failure_message));
            }
        }
        true
    }

    #[must_use]
    pub fn data(&self) -> Option<&D> {
        self.data.as_ref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Forget the data, e.g. when the signed-in user changes.
    pub fn reset(&mut self) {
        self.data = None;
        self.error = None;
        self.loading = false;
        self.issued += 1;
    }
}

impl<T> Provider<Vec<T>> {
    /// Current items; empty until the first successful fetch.
    #[must_use]
    pub fn items(&self) -> &[T] {
        self.data.as_deref().unwrap_or_default()
    }
}
