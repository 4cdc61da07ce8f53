//! Form validation and submission bookkeeping.
//!
//! Validators turn raw form input into request bodies or a keyed
//! [`ApiError::Validation`]; nothing reaches the network until they pass.
//! [`Submission`] enforces one in-flight request per form and holds what the
//! form should display afterwards.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use crate::error::{ApiError, FieldErrors};
use crate::payment::normalize_phone;
use crate::types::{
    CreateRoomRequest, LoginRequest, RegisterRequest, ServiceType, UpdatePasswordRequest, UpdatePhoneRequest,
};

/// Delay before navigating away after a register/reset success message.
pub const REDIRECT_DELAY_MS: u64 = 2_000;

pub const MIN_PASSWORD_LEN: usize = 8;

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTER_FAILED: &str = "Registration failed";
pub const REGISTER_SUCCEEDED: &str = "Registration successful! Redirecting to login...";
pub const CREATE_ROOM_FAILED: &str = "Failed to create room";
pub const JOIN_ROOM_FAILED: &str = "Failed to join room";
pub const LEAVE_ROOM_FAILED: &str = "Failed to leave room";
pub const DELETE_ROOM_FAILED: &str = "Failed to delete room";
pub const REMOVE_MEMBER_FAILED: &str = "Failed to remove member";
pub const PHONE_UPDATED: &str = "Phone number updated successfully";
pub const PHONE_UPDATE_FAILED: &str = "Failed to update phone number";
pub const PASSWORD_UPDATED: &str = "Password updated successfully";
pub const PASSWORD_UPDATE_FAILED: &str = "Failed to update password";

/// Collects per-field messages while validating a whole form.
#[derive(Debug, Default)]
struct Checks {
    fields: FieldErrors,
}

impl Checks {
    fn require(&mut self, field: &str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.fail(field, message);
        }
    }

    fn fail(&mut self, field: &str, message: &str) {
        self.fields.entry(field.to_owned()).or_insert_with(|| message.to_owned());
    }

    fn finish<T>(self, build: impl FnOnce() -> T) -> Result<T, ApiError> {
        if self.fields.is_empty() { Ok(build()) } else { Err(ApiError::Validation(self.fields)) }
    }
}

/// # Errors
///
/// `Validation` when either field is blank.
pub fn validate_login(email: &str, password: &str) -> Result<LoginRequest, ApiError> {
    let mut checks = Checks::default();
    checks.require("email", email, "Email is required");
    checks.require("password", password, "Password is required");
    checks.finish(|| LoginRequest {
        email: email.trim().to_owned(),
        password: password.to_owned(),
    })
}

/// # Errors
///
/// `Validation` keyed by `email`, `username`, and `password`.
pub fn validate_register(email: &str, username: &str, password: &str) -> Result<RegisterRequest, ApiError> {
    let mut checks = Checks::default();
    checks.require("email", email, "Email is required");
    if !email.trim().is_empty() && !email.contains('@') {
        checks.fail("email", "Enter a valid email address");
    }
    checks.require("username", username, "Username is required");
    if let Err(message) = check_password_length(password) {
        checks.fail("password", message);
    }
    checks.finish(|| RegisterRequest {
        email: email.trim().to_owned(),
        username: username.trim().to_owned(),
        password: password.to_owned(),
    })
}

/// Raw create-room form input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoomForm {
    pub name: String,
    pub description: String,
    pub service_type: String,
    pub due_date: String,
    pub cost: String,
}

impl RoomForm {
    /// # Errors
    ///
    /// `Validation` with one message per missing or invalid field.
    pub fn validate(&self) -> Result<CreateRoomRequest, ApiError> {
        let mut checks = Checks::default();
        checks.require("name", &self.name, "Room name is required");
        checks.require("description", &self.description, "Description is required");
        let service = ServiceType::from_slug(self.service_type.trim());
        if service.is_none() {
            checks.fail("service_type", "Service type is required");
        }
        checks.require("due_date", &self.due_date, "Due date is required");
        let cost = self
            .cost
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|cost| cost.is_finite() && *cost > 0.0);
        if cost.is_none() {
            checks.fail("cost", "Valid cost is required");
        }
        checks.finish(|| CreateRoomRequest {
            name: self.name.trim().to_owned(),
            description: self.description.trim().to_owned(),
            service_type: service.unwrap_or_default(),
            due_date: self.due_date.trim().to_owned(),
            cost: cost.unwrap_or_default(),
        })
    }
}

/// # Errors
///
/// `Validation` when the id is blank.
pub fn validate_room_id(room_id: &str) -> Result<String, ApiError> {
    let room_id = room_id.trim();
    if room_id.is_empty() {
        return Err(ApiError::invalid("room_id", "Please enter a valid room ID"));
    }
    Ok(room_id.to_owned())
}

fn check_password_length(password: &str) -> Result<(), &'static str> {
    if password.is_empty() {
        return Err("Password is required");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 8 characters long");
    }
    Ok(())
}

/// New password plus confirmation, as used by reset and profile forms.
///
/// # Errors
///
/// `Validation` on `confirm_password` for a mismatch, otherwise on
/// `new_password` for a short password.
pub fn validate_new_password(password: &str, confirmation: &str) -> Result<String, ApiError> {
    if password != confirmation {
        return Err(ApiError::invalid("confirm_password", "Passwords do not match"));
    }
    check_password_length(password).map_err(|message| ApiError::invalid("new_password", message))?;
    Ok(password.to_owned())
}

/// # Errors
///
/// `Validation` for a blank current password or an invalid new one.
pub fn validate_password_change(
    current: &str,
    new_password: &str,
    confirmation: &str,
) -> Result<UpdatePasswordRequest, ApiError> {
    if current.is_empty() {
        return Err(ApiError::invalid("current_password", "Current password is required"));
    }
    let new_password = validate_new_password(new_password, confirmation)?;
    Ok(UpdatePasswordRequest {
        current_password: current.to_owned(),
        new_password,
    })
}

/// # Errors
///
/// `Validation` on `phone` unless the number normalises to an MSISDN.
pub fn validate_phone_update(phone: &str) -> Result<UpdatePhoneRequest, ApiError> {
    Ok(UpdatePhoneRequest {
        phone_number: normalize_phone(phone)?,
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrengthLabel {
    Weak,
    Fair,
    Good,
    Strong,
}

impl StrengthLabel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weak => "Weak",
            Self::Fair => "Fair",
            Self::Good => "Good",
            Self::Strong => "Strong",
        }
    }
}

/// Password strength score, 0 to 100 in steps of 25.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PasswordStrength {
    pub score: u8,
}

impl PasswordStrength {
    #[must_use]
    pub fn label(self) -> StrengthLabel {
        match self.score {
            0..25 => StrengthLabel::Weak,
            25..50 => StrengthLabel::Fair,
            50..75 => StrengthLabel::Good,
            _ => StrengthLabel::Strong,
        }
    }
}

#[must_use]
pub fn password_strength(password: &str) -> PasswordStrength {
    let checks = [
        password.chars().count() >= MIN_PASSWORD_LEN,
        password.chars().any(char::is_lowercase) && password.chars().any(char::is_uppercase),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_alphanumeric()),
    ];
    let passed = checks.iter().filter(|passed| **passed).count();
    #[allow(clippy::cast_possible_truncation)]
    let score = (passed * 25) as u8;
    PasswordStrength { score }
}

/// Submission bookkeeping for one form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Submission {
    in_flight: bool,
    fields: FieldErrors,
    error: Option<String>,
    success: Option<String>,
    redirect_at_ms: Option<u64>,
}

impl Submission {
    /// Gate a submission on validation and on no request being in flight.
    ///
    /// Returns the validated body to send, or `None` when nothing should be
    /// sent (the reason is recorded on `self`).
    pub fn begin<V>(&mut self, validated: Result<V, ApiError>) -> Option<V> {
        if self.in_flight {
            return None;
        }
        self.error = None;
        self.success = None;
        match validated {
            Ok(value) => {
                self.fields.clear();
                self.in_flight = true;
                Some(value)
            }
            Err(ApiError::Validation(fields)) => {
                self.fields = fields;
                None
            }
            Err(err) => {
                self.error = Some(err.user_message(crate::error::UNEXPECTED_ERROR));
                None
            }
        }
    }

    /// Record success, optionally scheduling a redirect at `redirect_at_ms`.
    pub fn succeed(&mut self, message: Option<&str>, redirect_at_ms: Option<u64>) {
        self.in_flight = false;
        self.success = message.map(str::to_owned);
        self.redirect_at_ms = redirect_at_ms;
    }

    /// Record a failed request; keyed server errors go inline.
    pub fn fail(&mut self, err: &ApiError, fallback: &str) {
        self.in_flight = false;
        // The redirect to login handles these; nothing for the user to fix here.
        if matches!(err, ApiError::Unauthenticated | ApiError::Cancelled) {
            return;
        }
        if let Some(fields) = err.field_errors() {
            self.fields.clone_from(fields);
        }
        self.error = Some(err.user_message(fallback));
    }

    /// `true` once the scheduled redirect is due; fires once.
    pub fn redirect_due(&mut self, now_ms: u64) -> bool {
        match self.redirect_at_ms {
            Some(at) if now_ms >= at => {
                self.redirect_at_ms = None;
                true
            }
            _ => false,
        }
    }

    pub fn dismiss(&mut self) {
        self.error = None;
        self.success = None;
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    #[must_use]
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }
}
