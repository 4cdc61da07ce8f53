//! Wall clock and timers for the workflow state machines.
//!
//! The state machines take millisecond instants; this module supplies them
//! from `Date.now()` in the browser. Native builds get a monotonic stand-in so
//! pure helpers stay callable from tests.

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    #[cfg(feature = "csr")]
    {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let now = js_sys::Date::now() as u64;
        now
    }
    #[cfg(not(feature = "csr"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
    }
}

#[cfg(feature = "csr")]
pub async fn sleep(duration: std::time::Duration) {
    gloo_timers::future::sleep(duration).await;
}

/// Resolve after `ms` milliseconds.
#[cfg(feature = "csr")]
pub async fn sleep_ms(ms: u64) {
    sleep(std::time::Duration::from_millis(ms)).await;
}
