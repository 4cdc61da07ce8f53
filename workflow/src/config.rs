//! API base-URL configuration.
//!
//! The backend is split into an auth service, a room service, and a payments
//! service that may run on different hosts. Each base URL falls back to the
//! shared `FLIXSHARE_API_URL`, then to a local development default.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Default base URL used when nothing is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Shared base URL variable.
pub const API_URL_VAR: &str = "FLIXSHARE_API_URL";
/// Auth service override.
pub const AUTH_URL_VAR: &str = "FLIXSHARE_AUTH_URL";
/// Room service override.
pub const ROOMS_URL_VAR: &str = "FLIXSHARE_ROOMS_URL";
/// Payments service override.
pub const PAYMENTS_URL_VAR: &str = "FLIXSHARE_PAYMENTS_URL";

/// Backend service an endpoint belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Service {
    Auth,
    Rooms,
    Payments,
}

/// Resolved base URLs for every backend service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub auth_url: String,
    pub rooms_url: String,
    pub payments_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::with_base(DEFAULT_API_URL)
    }
}

impl ApiConfig {
    /// Point every service at the same base URL.
    pub fn with_base(base: &str) -> Self {
        let base = normalize_base(base);
        Self {
            auth_url: base.clone(),
            rooms_url: base.clone(),
            payments_url: base,
        }
    }

    /// Resolve configuration through a variable lookup (env, `option_env!`, CLI args).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let base = read(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        let service = |key: &str| normalize_base(&read(key).unwrap_or_else(|| base.clone()));
        Self {
            auth_url: service(AUTH_URL_VAR),
            rooms_url: service(ROOMS_URL_VAR),
            payments_url: service(PAYMENTS_URL_VAR),
        }
    }

    #[must_use]
    pub fn base_for(&self, service: Service) -> &str {
        match service {
            Service::Auth => &self.auth_url,
            Service::Rooms => &self.rooms_url,
            Service::Payments => &self.payments_url,
        }
    }

    /// Join a service base URL with an absolute endpoint path.
    #[must_use]
    pub fn url(&self, service: Service, path: &str) -> String {
        format!("{}{path}", self.base_for(service))
    }
}

fn normalize_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_owned()
}
