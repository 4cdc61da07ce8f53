//! Application header with navigation and the account menu.

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::net::ClientGateway;
use crate::state::auth::AuthState;

const NAV_ITEMS: [(&str, &str); 3] = [("/dashboard", "Dashboard"), ("/billing", "Billing"), ("/profile", "Profile")];

#[component]
pub fn TopBar(#[prop(optional, into)] title: Option<String>) -> impl IntoView {
    let gateway = expect_context::<ClientGateway>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let location = use_location();
    let menu_open = RwSignal::new(false);

    // Protected routes redirect once the auth signal sees the logout.
    let on_logout = move |_| {
        menu_open.set(false);
        gateway.logout();
    };

    view! {
        <header class="top-bar">
            <a class="top-bar__brand" href="/dashboard">"FlixShare"</a>
            {title.map(|title| view! { <span class="top-bar__title">{title}</span> })}
            <nav class="top-bar__nav">
                {NAV_ITEMS
                    .into_iter()
                    .map(|(href, label)| {
                        view! {
                            <a
                                class="top-bar__link"
                                class:top-bar__link--active=move || location.pathname.get() == href
                                href=href
                            >
                                {label}
                            </a>
                        }
                    })
                    .collect::<Vec<_>>()}
            </nav>
            <span class="top-bar__spacer"></span>
            <button
                class="top-bar__avatar"
                title=move || auth.with(AuthState::display_name)
                on:click=move |_| menu_open.update(|open| *open = !*open)
            >
                {move || auth.with(AuthState::initial)}
            </button>
            <Show when=move || menu_open.get()>
                <div class="top-bar__menu" on:click=move |ev| ev.stop_propagation()>
                    <p class="top-bar__menu-name">{move || auth.with(AuthState::display_name)}</p>
                    <a class="top-bar__menu-item" href="/profile">"Profile"</a>
                    <button class="top-bar__menu-item" on:click=on_logout.clone()>"Logout"</button>
                </div>
            </Show>
        </header>
    }
}
