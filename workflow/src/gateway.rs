//! Authenticated request gateway.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every outbound call goes through [`Gateway::call`]. It resolves the
//! endpoint to a URL, attaches `Authorization: Bearer <token>` for protected
//! endpoints, and classifies the outcome into [`ApiError`] so callers can treat
//! "session gone" separately from everything else.
//!
//! The HTTP stack is abstracted by [`Transport`]: `gloo-net` in the browser,
//! `reqwest` in the CLI, and a scripted mock in tests.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::endpoint::Endpoint;
use crate::error::{ApiError, TransportError};
use crate::events::{AuthEvent, AuthEvents};
use crate::token::TokenStore;

/// HTTP method subset used by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// Fully resolved request handed to a [`Transport`].
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
    pub bearer: Option<String>,
}

impl ApiRequest {
    /// Value of the `Authorization` header, if a credential is attached.
    #[must_use]
    pub fn authorization(&self) -> Option<String> {
        self.bearer.as_ref().map(|token| format!("Bearer {token}"))
    }
}

/// Raw response: status code plus body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes one HTTP exchange.
///
/// Futures are not required to be `Send`; browser fetch futures are not.
#[async_trait(?Send)]
pub trait Transport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// Credential-aware client for the FlixShare backend.
///
/// Clones share the token store and event subscribers.
#[derive(Clone, Debug)]
pub struct Gateway<T> {
    transport: T,
    tokens: TokenStore,
    config: Arc<ApiConfig>,
    events: AuthEvents,
}

impl<T: Transport> Gateway<T> {
    pub fn new(transport: T, tokens: TokenStore, config: ApiConfig) -> Self {
        Self {
            transport,
            tokens,
            config: Arc::new(config),
            events: AuthEvents::default(),
        }
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    #[must_use]
    pub fn events(&self) -> &AuthEvents {
        &self.events
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Activate a credential obtained from a login exchange.
    pub fn sign_in(&self, token: &str) {
        self.tokens.set(token);
        self.events.emit(AuthEvent::LoggedIn);
    }

    /// Drop the credential. In-flight requests fail on their own via 401.
    pub fn logout(&self) {
        self.tokens.clear();
        self.events.emit(AuthEvent::LoggedOut);
    }

    /// Execute `endpoint` and decode a JSON success body into `R`.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` when a protected endpoint has no credential or the
    /// server answers 401 to one that did; `Rejected` for any other non-2xx;
    /// `Transport`/`Decode` when no usable response was produced.
    pub async fn call<R: DeserializeOwned>(&self, endpoint: &Endpoint, body: Option<Value>) -> Result<R, ApiError> {
        let bearer = if endpoint.requires_auth() {
            let Some(token) = self.tokens.get() else {
                log::info!("{} {} skipped: no credential", endpoint.method().as_str(), endpoint.path());
                self.events.emit(AuthEvent::Unauthenticated);
                return Err(ApiError::Unauthenticated);
            };
            Some(token)
        } else {
            None
        };

        let request = ApiRequest {
            method: endpoint.method(),
            url: self.config.url(endpoint.service(), &endpoint.path()),
            body,
            bearer,
        };
        log::debug!("{} {}", request.method.as_str(), request.url);
        let bearer = request.bearer.clone();
        let response = self.transport.execute(request).await.map_err(|e| {
            log::warn!("{} transport failure: {e}", endpoint.path());
            ApiError::from(e)
        })?;

        if response.status == 401
            && let Some(token) = bearer
        {
            self.reject_credential(&token);
            return Err(ApiError::Unauthenticated);
        }
        if !response.is_success() {
            log::warn!("{} rejected with status {}", endpoint.path(), response.status);
            return Err(ApiError::rejected(response.status, &response.body));
        }
        decode_body(&response.body)
    }

    fn reject_credential(&self, token: &str) {
        let cleared = self.tokens.clear_if(token);
        // A newer login replaced the credential while this call was in flight.
        if !cleared && self.tokens.is_authenticated() {
            log::info!("stale credential rejected; keeping newer session");
            return;
        }
        log::warn!("credential rejected by server; signing out");
        self.events.emit(AuthEvent::Unauthenticated);
    }
}

/// Decode a success body. An empty body decodes as `null`, or as `{}` for
/// targets that cannot be null.
pub(crate) fn decode_body<R: DeserializeOwned>(body: &str) -> Result<R, ApiError> {
    if body.trim().is_empty() {
        return serde_json::from_str("null")
            .or_else(|_| serde_json::from_str("{}"))
            .map_err(|e| ApiError::Decode(e.to_string()));
    }
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}
