//! Email + password sign-in.

use leptos::prelude::*;
use workflow::forms::{Submission, validate_login};

use crate::components::form_status::{FieldError, FormStatus};
use crate::net::ClientGateway;
use crate::pages::redirect_signal;

#[component]
pub fn LoginPage() -> impl IntoView {
    let gateway = expect_context::<ClientGateway>();
    let redirect = redirect_signal();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let form = RwSignal::new(Submission::default());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let validated = validate_login(&email.get_untracked(), &password.get_untracked());
        let Some(request) = form.try_update(|f| f.begin(validated)).flatten() else {
            return;
        };
        #[cfg(feature = "csr")]
        {
            use workflow::forms::LOGIN_FAILED;
            use workflow::guard::HOME_PATH;

            let gateway = gateway.clone();
            leptos::task::spawn_local(async move {
                match gateway.login(&request.email, &request.password).await {
                    Ok(_) => {
                        form.update(|f| f.succeed(None, None));
                        redirect.set(Some(HOME_PATH));
                    }
                    Err(err) => {
                        leptos::logging::warn!("login failed: {err}");
                        form.update(|f| f.fail(&err, LOGIN_FAILED));
                    }
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (request, &gateway, redirect);
        }
    };

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h1>"Welcome back"</h1>
                <p class="auth-card__subtitle">"Sign in to manage your rooms"</p>
                <label class="auth-field">
                    "Email"
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <FieldError form=form field="email"/>
                </label>
                <label class="auth-field">
                    "Password"
                    <input
                        class="auth-input"
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <FieldError form=form field="password"/>
                </label>
                <FormStatus form=form on_dismiss=Callback::new(move |()| form.update(Submission::dismiss))/>
                <button class="btn btn--primary auth-submit" type="submit" disabled=move || form.with(Submission::is_submitting)>
                    {move || if form.with(Submission::is_submitting) { "Signing in..." } else { "Sign in" }}
                </button>
                <div class="auth-card__links">
                    <a href="/auth/reset-password">"Forgot password?"</a>
                    <a href="/auth/register">"Create an account"</a>
                </div>
            </form>
        </div>
    }
}
