//! Error taxonomy for gateway calls and local validation.
//!
//! ERROR HANDLING
//! ==============
//! Every failure a workflow can observe is one of four kinds: the session is
//! gone (`Unauthenticated`), local input is invalid (`Validation`), the server
//! rejected the request (`Rejected`), or the call never produced a usable
//! response (`Transport`, `Decode`, `Timeout`, `Cancelled`). Only the first is
//! handled globally; the rest are rendered by the workflow that issued the call.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use std::collections::BTreeMap;

use serde_json::Value;

/// Field name -> human-readable message.
pub type FieldErrors = BTreeMap<String, String>;

/// Message shown when no better description of a failure is available.
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

/// Message shown when the credential was missing or rejected.
pub const SESSION_EXPIRED: &str = "Your session has expired. Please sign in again.";

/// Message shown when a deadline elapsed before the server answered.
pub const TIMED_OUT: &str = "The request timed out. Please try again.";

/// Body keys that carry a top-level message rather than a field error.
const MESSAGE_KEYS: [&str; 4] = ["error", "errorMessage", "message", "detail"];

/// Failure raised by a [`crate::gateway::Transport`] before any HTTP status was seen.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Connection, DNS, CORS, or read failure.
    #[error("network request failed: {0}")]
    Network(String),
    /// The request could not be built (bad URL, unserializable body).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Error returned by every gateway operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// No credential, or the server rejected the one that was sent.
    #[error("not authenticated")]
    Unauthenticated,
    /// Local validation failed; nothing was sent.
    #[error("invalid input: {}", join_fields(.0))]
    Validation(FieldErrors),
    /// The server answered with a non-success status.
    #[error("request rejected with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
        fields: FieldErrors,
    },
    /// The transport failed before a response arrived.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// A success response did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
    /// The caller's deadline elapsed first.
    #[error("request timed out")]
    Timeout,
    /// The request was superseded or its owner went away.
    #[error("request cancelled")]
    Cancelled,
}

impl ApiError {
    /// Build a single-field validation error.
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        let mut fields = FieldErrors::new();
        fields.insert(field.to_owned(), message.into());
        Self::Validation(fields)
    }

    #[must_use]
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }

    /// Keyed errors for inline display, if the failure carries any.
    #[must_use]
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(fields) => Some(fields),
            Self::Rejected { fields, .. } if !fields.is_empty() => Some(fields),
            _ => None,
        }
    }

    /// Text suitable for a notification, preferring what the server said.
    ///
    /// `fallback` names the failed action ("Login failed") and is used when
    /// the server gave no message of its own.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Unauthenticated => SESSION_EXPIRED.to_owned(),
            Self::Validation(fields) => fields
                .values()
                .next()
                .cloned()
                .unwrap_or_else(|| fallback.to_owned()),
            Self::Rejected { message, .. } => message.clone().unwrap_or_else(|| fallback.to_owned()),
            Self::Timeout => TIMED_OUT.to_owned(),
            Self::Transport(_) | Self::Decode(_) | Self::Cancelled => UNEXPECTED_ERROR.to_owned(),
        }
    }

    /// Classify a non-success HTTP response body.
    #[must_use]
    pub fn rejected(status: u16, body: &str) -> Self {
        let value = serde_json::from_str::<Value>(body).ok();
        let fields = value.as_ref().map(extract_field_errors).unwrap_or_default();
        let message = value
            .as_ref()
            .and_then(extract_error_message)
            .or_else(|| fields.values().next().cloned());
        Self::Rejected { status, message, fields }
    }
}

/// Pull a top-level message out of an error body.
///
/// Recognises `{"error": ..}`, `{"errorMessage": ..}` (payment gateway),
/// `{"message": ..}`, `{"detail": ..}`, and `{"non_field_errors": [..]}`.
#[must_use]
pub fn extract_error_message(body: &Value) -> Option<String> {
    let object = body.as_object()?;
    for key in MESSAGE_KEYS {
        if let Some(text) = object.get(key).and_then(first_text) {
            return Some(text);
        }
    }
    object.get("non_field_errors").and_then(first_text)
}

/// Collect keyed validation errors (`{"cost": ["must be positive"]}`).
#[must_use]
pub fn extract_field_errors(body: &Value) -> FieldErrors {
    let Some(object) = body.as_object() else {
        return FieldErrors::new();
    };
    object
        .iter()
        .filter(|(key, _)| !MESSAGE_KEYS.contains(&key.as_str()) && key.as_str() != "non_field_errors")
        .filter_map(|(key, value)| first_text(value).map(|text| (key.clone(), text)))
        .collect()
}

fn first_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Array(items) => items.iter().find_map(first_text),
        _ => None,
    }
}

fn join_fields(fields: &FieldErrors) -> String {
    fields
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join(", ")
}
