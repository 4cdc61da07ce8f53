//! Endpoint table for the FlixShare backend.
//!
//! Each variant knows its HTTP method, owning service, path, and whether it
//! needs the bearer credential. Keeping this table pure makes routing
//! mistakes visible in unit tests instead of at runtime.

#[cfg(test)]
#[path = "endpoint_test.rs"]
mod endpoint_test;

use crate::config::Service;
use crate::gateway::Method;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    Register,
    SendResetOtp,
    VerifyResetOtp,
    ResetPassword,
    VerifySession,
    UpdatePhone,
    UpdatePassword,
    ListRooms,
    CreateRoom,
    JoinRoom,
    RoomDetail(String),
    LeaveRoom(String),
    DeleteRoom(String),
    RemoveMember(String),
    Transactions,
    StkPush,
}

impl Endpoint {
    #[must_use]
    pub fn method(&self) -> Method {
        match self {
            Self::VerifySession | Self::ListRooms | Self::RoomDetail(_) | Self::Transactions => Method::Get,
            Self::UpdatePhone | Self::UpdatePassword => Method::Put,
            Self::DeleteRoom(_) => Method::Delete,
            Self::Login
            | Self::Register
            | Self::SendResetOtp
            | Self::VerifyResetOtp
            | Self::ResetPassword
            | Self::CreateRoom
            | Self::JoinRoom
            | Self::LeaveRoom(_)
            | Self::RemoveMember(_)
            | Self::StkPush => Method::Post,
        }
    }

    #[must_use]
    pub fn service(&self) -> Service {
        match self {
            Self::Login
            | Self::Register
            | Self::SendResetOtp
            | Self::VerifyResetOtp
            | Self::ResetPassword
            | Self::VerifySession
            | Self::UpdatePhone
            | Self::UpdatePassword => Service::Auth,
            Self::ListRooms
            | Self::CreateRoom
            | Self::JoinRoom
            | Self::RoomDetail(_)
            | Self::LeaveRoom(_)
            | Self::DeleteRoom(_)
            | Self::RemoveMember(_) => Service::Rooms,
            Self::Transactions | Self::StkPush => Service::Payments,
        }
    }

    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/auth/login/".to_owned(),
            Self::Register => "/auth/register/".to_owned(),
            Self::SendResetOtp => "/auth/send-reset-otp/".to_owned(),
            Self::VerifyResetOtp => "/auth/verify-reset-otp/".to_owned(),
            Self::ResetPassword => "/auth/reset-password/".to_owned(),
            Self::VerifySession => "/auth/verify/".to_owned(),
            Self::UpdatePhone => "/auth/profile/phone/".to_owned(),
            Self::UpdatePassword => "/auth/profile/password/".to_owned(),
            Self::ListRooms => "/room/list/".to_owned(),
            Self::CreateRoom => "/room/create/".to_owned(),
            Self::JoinRoom => "/room/join/".to_owned(),
            Self::RoomDetail(id) => format!("/room/{id}/"),
            Self::LeaveRoom(id) => format!("/room/{id}/leave/"),
            Self::DeleteRoom(id) => format!("/room/{id}/delete/"),
            Self::RemoveMember(id) => format!("/room/{id}/remove-member/"),
            Self::Transactions => "/payments/transactions/".to_owned(),
            Self::StkPush => "/payments/stk-push/".to_owned(),
        }
    }

    /// Whether the call must carry the bearer credential.
    #[must_use]
    pub fn requires_auth(&self) -> bool {
        !matches!(
            self,
            Self::Login | Self::Register | Self::SendResetOtp | Self::VerifyResetOtp | Self::ResetPassword
        )
    }
}
