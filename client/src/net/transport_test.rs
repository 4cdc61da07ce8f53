use super::*;
use workflow::Method;

fn request(bearer: Option<&str>) -> ApiRequest {
    ApiRequest {
        method: Method::Get,
        url: "http://localhost:8000/room/list/".to_owned(),
        body: None,
        bearer: bearer.map(str::to_owned),
    }
}

#[test]
fn bearer_becomes_authorization_header() {
    let headers = request_headers(&request(Some("T1")));
    assert!(headers.contains(&("Authorization", "Bearer T1".to_owned())));
}

#[test]
fn anonymous_request_has_no_authorization_header() {
    let headers = request_headers(&request(None));
    assert!(headers.iter().all(|(name, _)| *name != "Authorization"));
    assert_eq!(headers[0], ("Accept", "application/json".to_owned()));
}

#[cfg(not(feature = "csr"))]
#[test]
fn native_build_reports_network_error() {
    let err = futures::executor::block_on(BrowserTransport.execute(request(None))).unwrap_err();
    assert!(matches!(err, TransportError::Network(message) if message.contains("/room/list/")));
}
