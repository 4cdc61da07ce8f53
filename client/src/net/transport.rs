//! `gloo-net` implementation of the gateway transport.
//!
//! Outside the `csr` build there is no browser fetch; requests fail with a
//! network error so native tests can still construct a client gateway.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use async_trait::async_trait;
use workflow::{ApiRequest, ApiResponse, Transport, TransportError};

/// Stateless fetch-backed transport.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

/// Headers sent with every request besides the JSON content type.
fn request_headers(request: &ApiRequest) -> Vec<(&'static str, String)> {
    let mut headers = vec![("Accept", "application/json".to_owned())];
    if let Some(value) = request.authorization() {
        headers.push(("Authorization", value));
    }
    headers
}

#[cfg(feature = "csr")]
fn gloo_method(method: workflow::Method) -> gloo_net::http::Method {
    match method {
        workflow::Method::Get => gloo_net::http::Method::GET,
        workflow::Method::Post => gloo_net::http::Method::POST,
        workflow::Method::Put => gloo_net::http::Method::PUT,
        workflow::Method::Delete => gloo_net::http::Method::DELETE,
    }
}

#[async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        #[cfg(feature = "csr")]
        {
            let mut builder =
                gloo_net::http::RequestBuilder::new(&request.url).method(gloo_method(request.method));
            for (name, value) in request_headers(&request) {
                builder = builder.header(name, &value);
            }
            let outgoing = match &request.body {
                Some(body) => builder.json(body),
                None => builder.build(),
            }
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
            let response = outgoing
                .send()
                .await
                .map_err(|e| TransportError::Network(e.to_string()))?;
            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| TransportError::Network(e.to_string()))?;
            Ok(ApiResponse::new(status, body))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request_headers(&request);
            Err(TransportError::Network(format!(
                "{} {} unavailable outside the browser",
                request.method.as_str(),
                request.url
            )))
        }
    }
}
