use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_to_local_development_url() {
    let config = ApiConfig::from_lookup(|_| None);
    assert_eq!(config, ApiConfig::default());
    assert_eq!(config.auth_url, "http://localhost:8000");
}

#[test]
fn shared_base_applies_to_every_service() {
    let config = ApiConfig::from_lookup(lookup_from(&[(API_URL_VAR, "https://api.example.com/")]));
    assert_eq!(config.auth_url, "https://api.example.com");
    assert_eq!(config.rooms_url, "https://api.example.com");
    assert_eq!(config.payments_url, "https://api.example.com");
}

#[test]
fn per_service_override_wins() {
    let config = ApiConfig::from_lookup(lookup_from(&[
        (API_URL_VAR, "http://localhost:8000"),
        (ROOMS_URL_VAR, "http://127.0.0.1:8080/"),
    ]));
    assert_eq!(config.auth_url, "http://localhost:8000");
    assert_eq!(config.rooms_url, "http://127.0.0.1:8080");
}

#[test]
fn blank_values_are_ignored() {
    let config = ApiConfig::from_lookup(lookup_from(&[(API_URL_VAR, "  ")]));
    assert_eq!(config.payments_url, DEFAULT_API_URL);
}

#[test]
fn url_joins_base_and_path() {
    let config = ApiConfig::with_base("http://h:1/");
    assert_eq!(config.url(Service::Rooms, "/room/list/"), "http://h:1/room/list/");
}
