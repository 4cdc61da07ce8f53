//! Deadlines and supersession for in-flight requests.
//!
//! Timers are passed in as futures so the same code runs against
//! `gloo-timers` in the browser, `tokio::time` in the CLI, and ready/pending
//! futures in tests.

#[cfg(test)]
#[path = "cancel_test.rs"]
mod cancel_test;

use std::future::Future;
use std::pin::pin;
use std::sync::{Arc, Mutex, PoisonError};

use futures::future::{AbortHandle, Abortable, Either, select};

use crate::error::ApiError;

/// Race `work` against `deadline`; the deadline firing first yields `Timeout`.
///
/// The losing future is dropped, which cancels the underlying request.
///
/// # Errors
///
/// `Timeout`, or whatever `work` failed with.
pub async fn with_deadline<R, W, D>(work: W, deadline: D) -> Result<R, ApiError>
where
    W: Future<Output = Result<R, ApiError>>,
    D: Future<Output = ()>,
{
    match select(pin!(work), pin!(deadline)).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => {
            log::warn!("request deadline elapsed");
            Err(ApiError::Timeout)
        }
    }
}

/// Holds at most one running request; starting another aborts the previous.
///
/// Clones share the slot, so a view can hand one to its cleanup hook.
#[derive(Clone, Debug, Default)]
pub struct RequestSlot {
    current: Arc<Mutex<Option<AbortHandle>>>,
}

impl RequestSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `work` in the slot, aborting whatever ran there before.
    ///
    /// # Errors
    ///
    /// `Cancelled` if a later `run` or [`RequestSlot::cancel`] supersedes this one.
    pub async fn run<R, W>(&self, work: W) -> Result<R, ApiError>
    where
        W: Future<Output = Result<R, ApiError>>,
    {
        let (handle, registration) = AbortHandle::new_pair();
        if let Some(previous) = self.lock().replace(handle) {
            previous.abort();
        }
        Abortable::new(work, registration)
            .await
            .unwrap_or(Err(ApiError::Cancelled))
    }

    /// Abort the running request, if any.
    pub fn cancel(&self) {
        if let Some(handle) = self.lock().take() {
            handle.abort();
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<AbortHandle>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
