//! Mobile-money payment workflow.
//!
//! SYSTEM CONTEXT
//! ==============
//! A member pays their share of a room through an STK push: the backend asks
//! the payment gateway to prompt the member's phone, and the final outcome
//! later shows up in the transaction list.
//!
//! STATE MACHINE
//! =============
//! `Idle -> Processing -> {Success, Failed}`. `Success` closes the dialog
//! after [`SUCCESS_CLOSE_MS`] and resets the selection; `Failed` returns to
//! `Idle` after [`FAILURE_RESET_MS`]. Callers drive time with [`PaymentAttempt::tick`].

#[cfg(test)]
#[path = "payment_test.rs"]
mod payment_test;

use std::future::Future;
use std::time::Duration;

use crate::cancel::with_deadline;
use crate::error::ApiError;
use crate::gateway::{Gateway, Transport};
use crate::types::{ChargeReceipt, ChargeRequest, Room};

pub const SUCCESS_CLOSE_MS: u64 = 3_000;
pub const FAILURE_RESET_MS: u64 = 5_000;

/// Upper bound on a single STK push round trip.
pub const SUBMIT_TIMEOUT: Duration = Duration::from_secs(30);

pub const PAYMENT_FAILED: &str = "Payment failed. Please try again.";
pub const PAYMENT_SENT: &str = "Payment request sent. Check your phone to complete the payment.";

const INVALID_PHONE: &str = "Enter a valid Safaricom number, e.g. 0712345678";

/// Amount each member owes: `round(cost / member_count)`, half away from zero.
///
/// # Errors
///
/// `Validation` when the room has no members or the share is not a positive
/// finite amount.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn per_member_share(cost: f64, member_count: u32) -> Result<u64, ApiError> {
    if member_count == 0 {
        return Err(ApiError::invalid("room", "This room has no members to split the cost between"));
    }
    let share = (cost / f64::from(member_count)).round();
    if !share.is_finite() || share <= 0.0 {
        return Err(ApiError::invalid("amount", "Amount must be greater than zero"));
    }
    Ok(share as u64)
}

/// Normalise a Kenyan mobile number to `2547XXXXXXXX` form.
///
/// Spaces and dashes are ignored, a leading `+` is dropped, and a leading `0`
/// becomes the `254` country code.
///
/// # Errors
///
/// `Validation` on the `phone` field.
pub fn normalize_phone(input: &str) -> Result<String, ApiError> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace() && *c != '-').collect();
    let digits = compact.strip_prefix('+').unwrap_or(&compact);
    if digits.is_empty() {
        return Err(ApiError::invalid("phone", "Phone number is required"));
    }
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ApiError::invalid("phone", INVALID_PHONE));
    }
    let normalized = match digits.strip_prefix('0') {
        Some(rest) => format!("254{rest}"),
        None => digits.to_owned(),
    };
    if normalized.len() != 12 || !normalized.starts_with("254") {
        return Err(ApiError::invalid("phone", INVALID_PHONE));
    }
    Ok(normalized)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PaymentState {
    #[default]
    Idle,
    Processing {
        since_ms: u64,
    },
    Success {
        at_ms: u64,
        checkout_request_id: Option<String>,
    },
    Failed {
        at_ms: u64,
        message: String,
    },
}

/// What the caller should do after [`PaymentAttempt::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Wait,
    /// Success shown long enough; close the dialog.
    Close,
    /// Failure shown long enough; the form is usable again.
    Reset,
}

/// One payment dialog's state: selection, phone, and progress.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PaymentAttempt {
    room: Option<Room>,
    phone: String,
    state: PaymentState,
}

impl PaymentAttempt {
    /// Fresh dialog, prefilled with the member's saved phone number.
    #[must_use]
    pub fn with_phone(phone: &str) -> Self {
        Self {
            phone: phone.to_owned(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn state(&self) -> &PaymentState {
        &self.state
    }

    #[must_use]
    pub fn room(&self) -> Option<&Room> {
        self.room.as_ref()
    }

    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    #[must_use]
    pub fn is_processing(&self) -> bool {
        matches!(self.state, PaymentState::Processing { .. })
    }

    /// Choose the room to pay for. Owners do not pay themselves.
    ///
    /// # Errors
    ///
    /// `Validation` for owned rooms or while a payment is running.
    pub fn select_room(&mut self, room: Room) -> Result<(), ApiError> {
        if self.is_processing() {
            return Err(ApiError::invalid("room", "A payment is already in progress"));
        }
        if room.is_owner() {
            return Err(ApiError::invalid("room", "You own this room"));
        }
        self.room = Some(room);
        Ok(())
    }

    pub fn set_phone(&mut self, phone: &str) {
        if !self.is_processing() {
            phone.clone_into(&mut self.phone);
        }
    }

    /// Share of the selected room, if one is selected.
    #[must_use]
    pub fn amount(&self) -> Option<Result<u64, ApiError>> {
        self.room.as_ref().map(|room| per_member_share(room.cost, room.member_count))
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.state == PaymentState::Idle && self.room.is_some() && !self.phone.trim().is_empty()
    }

    /// Validate and enter `Processing`, returning the charge to send.
    ///
    /// On error the state is unchanged.
    ///
    /// # Errors
    ///
    /// `Validation` for a missing room, owned room, bad phone, or bad amount.
    pub fn begin_submit(&mut self, now_ms: u64) -> Result<ChargeRequest, ApiError> {
        if self.state != PaymentState::Idle {
            return Err(ApiError::invalid("payment", "A payment is already in progress"));
        }
        let Some(room) = &self.room else {
            return Err(ApiError::invalid("room", "Please select a room"));
        };
        if room.is_owner() {
            return Err(ApiError::invalid("room", "You own this room"));
        }
        let phone = normalize_phone(&self.phone)?;
        let amount = per_member_share(room.cost, room.member_count)?;
        let request = ChargeRequest {
            phone,
            amount,
            room: room.id.clone(),
        };
        log::info!("payment for room {} started: {amount}", request.room);
        self.state = PaymentState::Processing { since_ms: now_ms };
        Ok(request)
    }

    /// Apply the charge outcome. Returns `true` when transactions should be
    /// refetched.
    pub fn resolve(&mut self, result: Result<ChargeReceipt, ApiError>, now_ms: u64) -> bool {
        if !self.is_processing() {
            log::debug!("ignoring payment outcome outside processing");
            return false;
        }
        match result {
            Ok(receipt) => {
                log::info!("payment accepted: {:?}", receipt.checkout_request_id);
                self.state = PaymentState::Success {
                    at_ms: now_ms,
                    checkout_request_id: receipt.checkout_request_id,
                };
                true
            }
            Err(err) => {
                log::warn!("payment failed: {err}");
                self.state = PaymentState::Failed {
                    at_ms: now_ms,
                    message: err.user_message(PAYMENT_FAILED),
                };
                false
            }
        }
    }

    /// Advance timers.
    pub fn tick(&mut self, now_ms: u64) -> TickOutcome {
        match &self.state {
            PaymentState::Success { at_ms, .. } if now_ms >= at_ms + SUCCESS_CLOSE_MS => {
                self.state = PaymentState::Idle;
                self.room = None;
                TickOutcome::Close
            }
            PaymentState::Failed { at_ms, .. } if now_ms >= at_ms + FAILURE_RESET_MS => {
                self.state = PaymentState::Idle;
                TickOutcome::Reset
            }
            _ => TickOutcome::Wait,
        }
    }

    /// Milliseconds until the next [`PaymentAttempt::tick`] can change state.
    #[must_use]
    pub fn next_deadline(&self, now_ms: u64) -> Option<u64> {
        let due = match &self.state {
            PaymentState::Success { at_ms, .. } => at_ms + SUCCESS_CLOSE_MS,
            PaymentState::Failed { at_ms, .. } => at_ms + FAILURE_RESET_MS,
            PaymentState::Idle | PaymentState::Processing { .. } => return None,
        };
        Some(due.saturating_sub(now_ms))
    }
}

/// Send `request` bounded by `deadline` (usually a [`SUBMIT_TIMEOUT`] sleep).
///
/// # Errors
///
/// `Timeout` if the deadline fires first, otherwise any gateway error.
pub async fn submit_charge<T, D>(
    gateway: &Gateway<T>,
    request: &ChargeRequest,
    deadline: D,
) -> Result<ChargeReceipt, ApiError>
where
    T: Transport,
    D: Future<Output = ()>,
{
    with_deadline(gateway.stk_push(request), deadline).await
}
