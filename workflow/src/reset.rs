//! Password-reset wizard.
//!
//! Steps advance strictly `RequestOtp -> VerifyOtp -> SetNewPassword -> Done`
//! and only on a server-confirmed success of the current step. Resending the
//! code is possible only while verifying and never changes the step.

#[cfg(test)]
#[path = "reset_test.rs"]
mod reset_test;

use crate::error::ApiError;
use crate::forms::{REDIRECT_DELAY_MS, Submission, validate_new_password};
use crate::types::ResetPasswordRequest;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResetStep {
    #[default]
    RequestOtp,
    VerifyOtp,
    SetNewPassword,
    Done,
}

impl ResetStep {
    /// Zero-based position for a stepper widget.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::RequestOtp => 0,
            Self::VerifyOtp => 1,
            Self::SetNewPassword => 2,
            Self::Done => 3,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::RequestOtp => "Enter email",
            Self::VerifyOtp => "Verify OTP",
            Self::SetNewPassword => "New password",
            Self::Done => "Done",
        }
    }
}

/// The request a step is waiting on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pending {
    Send,
    Resend,
    Verify,
    Reset,
}

impl Pending {
    fn messages(self) -> (&'static str, &'static str) {
        match self {
            Self::Send => ("OTP sent to your email address", "Failed to send OTP"),
            Self::Resend => ("OTP resent to your email address", "Failed to resend OTP"),
            Self::Verify => ("OTP verified successfully", "Invalid OTP"),
            Self::Reset => ("Password reset successfully! Redirecting to login...", "Failed to reset password"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResetWizard {
    step: ResetStep,
    email: String,
    otp: String,
    pending: Option<Pending>,
    form: Submission,
}

impl ResetWizard {
    #[must_use]
    pub fn step(&self) -> ResetStep {
        self.step
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn form(&self) -> &Submission {
        &self.form
    }

    pub fn dismiss(&mut self) {
        self.form.dismiss();
    }

    /// Step 1: returns the email to send the code to.
    pub fn request_otp(&mut self, email: &str) -> Option<String> {
        if self.step != ResetStep::RequestOtp {
            return None;
        }
        let email = email.trim();
        let validated = if email.contains('@') {
            Ok(email.to_owned())
        } else {
            Err(ApiError::invalid("email", "Enter a valid email address"))
        };
        let email = self.form.begin(validated)?;
        email.clone_into(&mut self.email);
        self.pending = Some(Pending::Send);
        Some(email)
    }

    /// Step 2 only: send the code again to the same email.
    pub fn resend_otp(&mut self) -> Option<String> {
        if self.step != ResetStep::VerifyOtp {
            return None;
        }
        let email = self.form.begin(Ok::<_, ApiError>(self.email.clone()))?;
        self.pending = Some(Pending::Resend);
        Some(email)
    }

    /// Step 2: returns `(email, otp)` to verify.
    pub fn verify_otp(&mut self, otp: &str) -> Option<(String, String)> {
        if self.step != ResetStep::VerifyOtp {
            return None;
        }
        let otp = otp.trim();
        let validated = if otp.is_empty() {
            Err(ApiError::invalid("otp", "OTP is required"))
        } else {
            Ok(otp.to_owned())
        };
        let otp = self.form.begin(validated)?;
        otp.clone_into(&mut self.otp);
        self.pending = Some(Pending::Verify);
        Some((self.email.clone(), otp))
    }

    /// Step 3: returns the reset body once the passwords validate.
    pub fn set_password(&mut self, password: &str, confirmation: &str) -> Option<ResetPasswordRequest> {
        if self.step != ResetStep::SetNewPassword {
            return None;
        }
        let new_password = self.form.begin(validate_new_password(password, confirmation))?;
        self.pending = Some(Pending::Reset);
        Some(ResetPasswordRequest {
            email: self.email.clone(),
            otp: self.otp.clone(),
            new_password,
        })
    }

    /// Apply the outcome of the request started last. Advances one step on
    /// success of send, verify, or reset.
    pub fn complete(&mut self, result: Result<(), ApiError>, now_ms: u64) {
        let Some(pending) = self.pending.take() else {
            log::debug!("reset outcome with nothing pending");
            return;
        };
        let (succeeded, failed) = pending.messages();
        match result {
            Ok(()) => {
                let redirect = (pending == Pending::Reset).then_some(now_ms + REDIRECT_DELAY_MS);
                self.form.succeed(Some(succeeded), redirect);
                self.step = match (pending, self.step) {
                    (Pending::Send, ResetStep::RequestOtp) => ResetStep::VerifyOtp,
                    (Pending::Verify, ResetStep::VerifyOtp) => ResetStep::SetNewPassword,
                    (Pending::Reset, ResetStep::SetNewPassword) => ResetStep::Done,
                    (_, step) => step,
                };
            }
            Err(err) => self.form.fail(&err, failed),
        }
    }

    /// `true` once, when it is time to navigate to login.
    pub fn redirect_due(&mut self, now_ms: u64) -> bool {
        self.step == ResetStep::Done && self.form.redirect_due(now_ms)
    }
}
