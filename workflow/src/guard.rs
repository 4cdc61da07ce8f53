//! Route guard for protected pages.
//!
//! The check is a synchronous presence test on the token store. A token the
//! server has since revoked still passes; the first protected call then
//! fails through the gateway's unauthenticated path.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::token::TokenStore;

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/auth/login";

/// Landing page after a successful login.
pub const HOME_PATH: &str = "/dashboard";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    Render,
    Redirect(&'static str),
}

#[must_use]
pub fn guard(tokens: &TokenStore) -> RouteDecision {
    if tokens.is_authenticated() {
        RouteDecision::Render
    } else {
        RouteDecision::Redirect(LOGIN_PATH)
    }
}

/// Pages reachable without a credential.
#[must_use]
pub fn is_public_path(path: &str) -> bool {
    path == "/" || path.starts_with("/auth/")
}
