//! Route wrapper that renders its children only for signed-in users.
//!
//! The check is the synchronous token presence test from
//! `workflow::guard`; it re-runs whenever the auth signal changes, so logout
//! and rejected credentials redirect immediately. A failed identity fetch
//! shows a Retry control instead of refetching on its own.

use leptos::prelude::*;
use leptos_router::components::Redirect;
use workflow::guard::{RouteDecision, guard};

use crate::net::api::load_session;
use crate::net::{ClientGateway, ClientSession};
use crate::state::auth::AuthState;

#[component]
pub fn Protected(children: ChildrenFn) -> impl IntoView {
    let gateway = expect_context::<ClientGateway>();
    let session = expect_context::<ClientSession>();
    let auth = expect_context::<RwSignal<AuthState>>();

    let decision = Memo::new(move |_| {
        auth.track();
        guard(gateway.tokens())
    });

    Effect::new({
        let session = session.clone();
        move || {
            if decision.get() == RouteDecision::Render && auth.with(AuthState::needs_session) {
                load_session(&session, auth);
            }
        }
    });

    let retry = move |_: leptos::ev::MouseEvent| load_session(&session, auth);

    move || match decision.get() {
        RouteDecision::Render => {
            let retry = retry.clone();
            view! {
                {move || {
                    auth.with(|state| state.session_error().map(str::to_owned))
                        .map(|message| {
                            let retry = retry.clone();
                            view! {
                                <div class="panel-error">
                                    <p>{message}</p>
                                    <button class="btn" on:click=retry>"Retry"</button>
                                </div>
                            }
                        })
                }}
                {children()}
            }
            .into_any()
        }
        RouteDecision::Redirect(path) => view! { <Redirect path=path/> }.into_any(),
    }
}
