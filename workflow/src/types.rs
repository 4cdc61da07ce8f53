//! Wire DTOs for the FlixShare backend.
//!
//! DESIGN
//! ======
//! Field names follow the backend's snake_case JSON. The room service returns
//! decimal costs as strings and some ids as numbers, so amounts and ids go
//! through tolerant deserializers instead of failing the whole payload.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Identity returned by `GET /auth/verify/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(deserialize_with = "deserialize_id")]
    pub user_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl Session {
    /// Name to greet the user with, falling back to the id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.username.is_empty() { &self.user_id } else { &self.username }
    }
}

/// The caller's relationship to a room.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomRole {
    Owner,
    #[default]
    Member,
}

/// Whether a member has covered the current billing period.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    #[default]
    Pending,
    Overdue,
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Pending => "Pending",
            Self::Overdue => "Overdue",
            Self::Unknown => "Unknown",
        }
    }
}

/// Streaming service a room shares.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceType {
    #[serde(rename = "netflix")]
    Netflix,
    #[serde(rename = "spotify")]
    Spotify,
    #[serde(rename = "disney+")]
    DisneyPlus,
    #[serde(rename = "hbomax")]
    HboMax,
    #[serde(rename = "youtube")]
    YouTube,
    #[serde(rename = "appletv")]
    AppleTv,
    #[default]
    #[serde(other)]
    Other,
}

impl ServiceType {
    /// Services offered by the create-room form.
    pub const ALL: [Self; 6] = [
        Self::Netflix,
        Self::Spotify,
        Self::DisneyPlus,
        Self::HboMax,
        Self::YouTube,
        Self::AppleTv,
    ];

    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Netflix => "netflix",
            Self::Spotify => "spotify",
            Self::DisneyPlus => "disney+",
            Self::HboMax => "hbomax",
            Self::YouTube => "youtube",
            Self::AppleTv => "appletv",
            Self::Other => "other",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Netflix => "Netflix",
            Self::Spotify => "Spotify",
            Self::DisneyPlus => "Disney+",
            Self::HboMax => "HBO Max",
            Self::YouTube => "YouTube Premium",
            Self::AppleTv => "Apple TV+",
            Self::Other => "Other",
        }
    }

    /// Parse a form value; unknown slugs yield `None`.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|service| service.slug() == slug)
    }
}

/// Room summary as listed on the dashboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Room {
    #[serde(deserialize_with = "deserialize_id", alias = "room_id")]
    pub id: String,
    pub name: String,
    #[serde(default, alias = "service_type")]
    pub service: ServiceType,
    #[serde(default)]
    pub description: String,
    /// Whole-room monthly amount.
    #[serde(deserialize_with = "deserialize_amount")]
    pub cost: f64,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub role: RoomRole,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub member_count: u32,
    #[serde(default)]
    pub owner_username: String,
}

impl Room {
    #[must_use]
    pub fn is_owner(&self) -> bool {
        self.role == RoomRole::Owner
    }
}

/// Envelope of `GET /room/list/`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomList {
    #[serde(default)]
    pub rooms: Vec<Room>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomMember {
    #[serde(deserialize_with = "deserialize_id")]
    pub user_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub role: RoomRole,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default, alias = "join_date")]
    pub joined_at: String,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub amount_due: Option<f64>,
}

/// Member counts per payment status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaymentSummary {
    pub paid: usize,
    pub pending: usize,
    pub overdue: usize,
}

/// Full room as returned by `GET /room/{id}/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomDetail {
    #[serde(deserialize_with = "deserialize_id", alias = "room_id")]
    pub id: String,
    pub name: String,
    #[serde(default, alias = "service_type")]
    pub service: ServiceType,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub cost: f64,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub owner_username: String,
    #[serde(default)]
    pub user_role: RoomRole,
    #[serde(default)]
    pub user_payment_status: PaymentStatus,
    #[serde(default)]
    pub members: Vec<RoomMember>,
    #[serde(default)]
    pub member_count: u32,
    #[serde(default)]
    pub account_email: Option<String>,
    #[serde(default)]
    pub account_password: Option<String>,
}

impl RoomDetail {
    #[must_use]
    pub fn payment_summary(&self) -> PaymentSummary {
        self.members
            .iter()
            .fold(PaymentSummary::default(), |mut summary, member| {
                match member.payment_status {
                    PaymentStatus::Paid => summary.paid += 1,
                    PaymentStatus::Pending => summary.pending += 1,
                    PaymentStatus::Overdue => summary.overdue += 1,
                    PaymentStatus::Unknown => {}
                }
                summary
            })
    }

    /// Summary view used by the payment workflow.
    #[must_use]
    pub fn to_room(&self) -> Room {
        Room {
            id: self.id.clone(),
            name: self.name.clone(),
            service: self.service,
            description: self.description.clone(),
            cost: self.cost,
            due_date: self.due_date.clone(),
            created_at: self.created_at.clone(),
            role: self.user_role,
            payment_status: self.user_payment_status,
            member_count: self.member_count,
            owner_username: self.owner_username.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Pending,
    Successful,
    Failed,
    #[serde(other)]
    Unknown,
}

/// A mobile-money charge recorded by the payments service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: f64,
    #[serde(default, rename = "MpesaReceiptNumber", alias = "receipt_number")]
    pub receipt_number: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub status: TransactionStatus,
    #[serde(default)]
    pub room_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendOtpRequest {
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    pub new_password: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreateRoomRequest {
    pub name: String,
    pub description: String,
    pub service_type: ServiceType,
    pub due_date: String,
    pub cost: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRoomRequest {
    pub room_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveMemberRequest {
    pub user_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePhoneRequest {
    pub phone_number: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Body of `POST /payments/stk-push/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeRequest {
    /// Normalised MSISDN (`2547XXXXXXXX`).
    pub phone: String,
    /// Whole currency units.
    pub amount: u64,
    /// Room id the charge is for.
    pub room: String,
}

/// Acknowledgement of an STK push; the final outcome shows up as a transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeReceipt {
    #[serde(default, rename = "CheckoutRequestID", alias = "checkoutRequestId")]
    pub checkout_request_id: Option<String>,
    #[serde(default, rename = "CustomerMessage")]
    pub customer_message: Option<String>,
}

/// Generic `{ "message": .. }` acknowledgement.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => Ok(text),
        serde_json::Value::Number(number) => Ok(number.to_string()),
        _ => Err(D::Error::custom("expected string or number id")),
    }
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    amount_from_value(&value).ok_or_else(|| D::Error::custom(format!("expected amount, got {value}")))
}

fn deserialize_optional_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    amount_from_value(&value)
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("expected amount, got {value}")))
}

fn amount_from_value(value: &serde_json::Value) -> Option<f64> {
    let amount = match value {
        serde_json::Value::Number(number) => number.as_f64()?,
        serde_json::Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    amount.is_finite().then_some(amount)
}
