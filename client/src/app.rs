//! FlixShare root: wires the gateway, session resolver, and data providers
//! into context, then mounts the public and protected routes.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};
use workflow::Gateway;
use workflow::config::{API_URL_VAR, AUTH_URL_VAR, ApiConfig, PAYMENTS_URL_VAR, ROOMS_URL_VAR};
use workflow::provider::Provider;

use crate::components::notice_toast::NoticeToast;
use crate::components::protected::Protected;
use crate::net::storage::browser_token_store;
use crate::net::transport::BrowserTransport;
use crate::net::{ClientGateway, ClientSession};
use crate::pages::{
    billing::BillingPage, dashboard::DashboardPage, home::HomePage, login::LoginPage, profile::ProfilePage,
    register::RegisterPage, reset_password::ResetPasswordPage, room_detail::RoomDetailPage,
};
use crate::state::auth::AuthState;
use crate::state::notice::NoticeState;
use crate::state::rooms::{rooms_state, transactions_state};
use crate::util::auth::{bridge_auth_events, install_unauth_redirect};

/// Build-time configuration lookup (`FLIXSHARE_*_URL` at compile time).
fn compiled_var(key: &str) -> Option<&'static str> {
    match key {
        API_URL_VAR => option_env!("FLIXSHARE_API_URL"),
        AUTH_URL_VAR => option_env!("FLIXSHARE_AUTH_URL"),
        ROOMS_URL_VAR => option_env!("FLIXSHARE_ROOMS_URL"),
        PAYMENTS_URL_VAR => option_env!("FLIXSHARE_PAYMENTS_URL"),
        _ => None,
    }
}

pub fn api_config() -> ApiConfig {
    ApiConfig::from_lookup(|key| compiled_var(key).map(str::to_owned))
}

/// Root application component.
///
/// Provides the gateway, session resolver, and shared state contexts, and
/// sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let gateway: ClientGateway = Gateway::new(BrowserTransport, browser_token_store(), api_config());
    let session = ClientSession::new(gateway.clone());
    let auth = RwSignal::new(AuthState::new(gateway.tokens().is_authenticated()));
    let rooms = RwSignal::new(rooms_state());
    let transactions = RwSignal::new(transactions_state());
    let notices = RwSignal::new(NoticeState::default());

    bridge_auth_events(&gateway, auth);

    // Per-user collections must not leak across a sign-out/sign-in.
    Effect::new(move |previous: Option<bool>| {
        let signed_in = auth.with(|state| state.signed_in);
        if previous.is_some_and(|was| was != signed_in) {
            rooms.update(Provider::reset);
            transactions.update(Provider::reset);
        }
        signed_in
    });

    provide_context(gateway);
    provide_context(session);
    provide_context(auth);
    provide_context(rooms);
    provide_context(transactions);
    provide_context(notices);

    view! {
        <Title text="FlixShare"/>

        <Router>
            <SessionRedirect/>
            <NoticeToast/>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=(StaticSegment("auth"), StaticSegment("login")) view=LoginPage/>
                <Route path=(StaticSegment("auth"), StaticSegment("register")) view=RegisterPage/>
                <Route path=(StaticSegment("auth"), StaticSegment("reset-password")) view=ResetPasswordPage/>
                <Route
                    path=StaticSegment("dashboard")
                    view=|| view! { <Protected><DashboardPage/></Protected> }
                />
                <Route
                    path=(StaticSegment("room"), ParamSegment("id"))
                    view=|| view! { <Protected><RoomDetailPage/></Protected> }
                />
                <Route
                    path=StaticSegment("billing")
                    view=|| view! { <Protected><BillingPage/></Protected> }
                />
                <Route
                    path=StaticSegment("profile")
                    view=|| view! { <Protected><ProfilePage/></Protected> }
                />
            </Routes>
        </Router>
    }
}

/// Router-level listener that sends the user to login when the gateway
/// reports a missing or rejected credential.
#[component]
fn SessionRedirect() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let location = use_location();
    install_unauth_redirect(auth, location.pathname, use_navigate());
}
