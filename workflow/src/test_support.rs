//! Scripted transport and gateway builders shared by unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::TransportError;
use crate::gateway::{ApiRequest, ApiResponse, Gateway, Transport};
use crate::token::TokenStore;

pub(crate) const TEST_BASE: &str = "http://api.test";

enum Scripted {
    Reply(Result<ApiResponse, TransportError>),
    Hang,
}

#[derive(Default)]
struct MockInner {
    script: VecDeque<Scripted>,
    requests: Vec<ApiRequest>,
}

/// Transport that replays queued responses in order and records requests.
#[derive(Clone, Default)]
pub(crate) struct MockTransport {
    inner: Arc<Mutex<MockInner>>,
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MockTransport")
    }
}

impl MockTransport {
    pub(crate) fn respond(&self, status: u16, body: Value) -> &Self {
        self.push(Scripted::Reply(Ok(ApiResponse::new(status, body.to_string()))))
    }

    pub(crate) fn respond_raw(&self, status: u16, body: &str) -> &Self {
        self.push(Scripted::Reply(Ok(ApiResponse::new(status, body))))
    }

    pub(crate) fn fail(&self, error: TransportError) -> &Self {
        self.push(Scripted::Reply(Err(error)))
    }

    /// The next request never completes.
    pub(crate) fn hang(&self) -> &Self {
        self.push(Scripted::Hang)
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub(crate) fn last_request(&self) -> Option<ApiRequest> {
        self.inner.lock().unwrap().requests.last().cloned()
    }

    fn push(&self, entry: Scripted) -> &Self {
        self.inner.lock().unwrap().script.push_back(entry);
        self
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let next = {
            let mut inner = self.inner.lock().unwrap();
            inner.requests.push(request);
            inner.script.pop_front()
        };
        match next {
            Some(Scripted::Reply(reply)) => reply,
            Some(Scripted::Hang) => futures::future::pending().await,
            None => Err(TransportError::Network("no scripted response".to_owned())),
        }
    }
}

pub(crate) fn gateway() -> (Gateway<MockTransport>, MockTransport) {
    let mock = MockTransport::default();
    let gateway = Gateway::new(mock.clone(), TokenStore::in_memory(), ApiConfig::with_base(TEST_BASE));
    (gateway, mock)
}

pub(crate) fn signed_in_gateway(token: &str) -> (Gateway<MockTransport>, MockTransport) {
    let (gateway, mock) = gateway();
    gateway.tokens().set(token);
    (gateway, mock)
}
