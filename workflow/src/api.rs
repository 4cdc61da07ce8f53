//! Typed operations over [`Gateway::call`], one per backend endpoint.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde_json::Value;

use crate::endpoint::Endpoint;
use crate::error::{ApiError, TransportError};
use crate::gateway::{Gateway, Transport};
use crate::types::{
    Ack, ChargeReceipt, ChargeRequest, CreateRoomRequest, JoinRoomRequest, LoginRequest, RegisterRequest,
    RemoveMemberRequest, ResetPasswordRequest, Room, RoomDetail, RoomList, SendOtpRequest, Session, TokenResponse,
    Transaction, UpdatePasswordRequest, UpdatePhoneRequest, VerifyOtpRequest,
};

fn to_body<B: Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| TransportError::InvalidRequest(e.to_string()).into())
}

impl<T: Transport> Gateway<T> {
    /// Exchange credentials for a token and activate it.
    ///
    /// # Errors
    ///
    /// `Rejected` with the server's message (e.g. "Invalid credentials").
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let body = to_body(&LoginRequest {
            email: email.to_owned(),
            password: password.to_owned(),
        })?;
        let response: TokenResponse = self.call(&Endpoint::Login, Some(body)).await?;
        if response.token.is_empty() {
            return Err(ApiError::Decode("login response carried an empty token".to_owned()));
        }
        self.sign_in(&response.token);
        Ok(response)
    }

    /// # Errors
    ///
    /// `Rejected` carrying per-field messages for taken usernames/emails.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Ack, ApiError> {
        self.call(&Endpoint::Register, Some(to_body(request)?)).await
    }

    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn send_reset_otp(&self, email: &str) -> Result<Ack, ApiError> {
        let body = to_body(&SendOtpRequest {
            email: email.to_owned(),
        })?;
        self.call(&Endpoint::SendResetOtp, Some(body)).await
    }

    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn verify_reset_otp(&self, email: &str, otp: &str) -> Result<Ack, ApiError> {
        let body = to_body(&VerifyOtpRequest {
            email: email.to_owned(),
            otp: otp.to_owned(),
        })?;
        self.call(&Endpoint::VerifyResetOtp, Some(body)).await
    }

    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<Ack, ApiError> {
        self.call(&Endpoint::ResetPassword, Some(to_body(request)?)).await
    }

    /// Resolve the identity behind the current credential.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` when there is no credential or it was rejected.
    pub async fn verify_session(&self) -> Result<Session, ApiError> {
        self.call(&Endpoint::VerifySession, None).await
    }

    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn update_phone(&self, phone_number: &str) -> Result<Ack, ApiError> {
        let body = to_body(&UpdatePhoneRequest {
            phone_number: phone_number.to_owned(),
        })?;
        self.call(&Endpoint::UpdatePhone, Some(body)).await
    }

    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn update_password(&self, request: &UpdatePasswordRequest) -> Result<Ack, ApiError> {
        self.call(&Endpoint::UpdatePassword, Some(to_body(request)?)).await
    }

    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn list_rooms(&self) -> Result<Vec<Room>, ApiError> {
        let list: RoomList = self.call(&Endpoint::ListRooms, None).await?;
        Ok(list.rooms)
    }

    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn room_detail(&self, room_id: &str) -> Result<RoomDetail, ApiError> {
        self.call(&Endpoint::RoomDetail(room_id.to_owned()), None).await
    }

    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn create_room(&self, request: &CreateRoomRequest) -> Result<Value, ApiError> {
        self.call(&Endpoint::CreateRoom, Some(to_body(request)?)).await
    }

    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn join_room(&self, room_id: &str) -> Result<Ack, ApiError> {
        let body = to_body(&JoinRoomRequest {
            room_id: room_id.to_owned(),
        })?;
        self.call(&Endpoint::JoinRoom, Some(body)).await
    }

    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn leave_room(&self, room_id: &str) -> Result<Ack, ApiError> {
        self.call(&Endpoint::LeaveRoom(room_id.to_owned()), None).await
    }

    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn delete_room(&self, room_id: &str) -> Result<Ack, ApiError> {
        self.call(&Endpoint::DeleteRoom(room_id.to_owned()), None).await
    }

    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn remove_member(&self, room_id: &str, user_id: &str) -> Result<Ack, ApiError> {
        let body = to_body(&RemoveMemberRequest {
            user_id: user_id.to_owned(),
        })?;
        self.call(&Endpoint::RemoveMember(room_id.to_owned()), Some(body)).await
    }

    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        self.call(&Endpoint::Transactions, None).await
    }

    /// Start a mobile-money charge. Success only means the prompt was sent.
    ///
    /// # Errors
    ///
    /// `Rejected` with the payment gateway's `errorMessage` when it declines.
    pub async fn stk_push(&self, request: &ChargeRequest) -> Result<ChargeReceipt, ApiError> {
        self.call(&Endpoint::StkPush, Some(to_body(request)?)).await
    }
}
