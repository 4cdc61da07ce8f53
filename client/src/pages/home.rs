//! Public landing page.

use leptos::prelude::*;
use leptos_router::components::Redirect;
use workflow::guard::HOME_PATH;
use workflow::types::ServiceType;

use crate::state::auth::AuthState;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    view! {
        <Show
            when=move || !auth.with(|a| a.signed_in)
            fallback=|| view! { <Redirect path=HOME_PATH/> }
        >
            <div class="home-page">
                <section class="home-hero">
                    <h1>"FlixShare"</h1>
                    <p class="home-hero__tagline">
                        "Split streaming subscriptions with friends and pay your share by M-Pesa."
                    </p>
                    <div class="home-hero__actions">
                        <a class="btn btn--primary" href="/auth/register">"Get started"</a>
                        <a class="btn" href="/auth/login">"Sign in"</a>
                    </div>
                </section>
                <ul class="home-services">
                    {ServiceType::ALL
                        .into_iter()
                        .map(|service| view! { <li class="home-services__item">{service.label()}</li> })
                        .collect::<Vec<_>>()}
                </ul>
            </div>
        </Show>
    }
}
