//! Account registration with a password-strength meter.
//!
//! A successful registration shows a confirmation and moves to the login
//! page after `REDIRECT_DELAY_MS`.

use leptos::prelude::*;
use workflow::forms::{Submission, validate_register};

use crate::components::form_status::{FieldError, FormStatus};
use crate::components::password_strength::PasswordStrength;
use crate::net::ClientGateway;
use crate::pages::redirect_signal;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let gateway = expect_context::<ClientGateway>();
    let redirect = redirect_signal();
    let email = RwSignal::new(String::new());
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let form = RwSignal::new(Submission::default());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let validated = validate_register(&email.get_untracked(), &username.get_untracked(), &password.get_untracked());
        let Some(request) = form.try_update(|f| f.begin(validated)).flatten() else {
            return;
        };
        #[cfg(feature = "csr")]
        {
            use workflow::forms::{REDIRECT_DELAY_MS, REGISTER_FAILED, REGISTER_SUCCEEDED};
            use workflow::guard::LOGIN_PATH;

            use crate::util::clock::{now_ms, sleep_ms};

            let gateway = gateway.clone();
            leptos::task::spawn_local(async move {
                if let Err(err) = gateway.register(&request).await {
                    form.update(|f| f.fail(&err, REGISTER_FAILED));
                    return;
                }
                let at = now_ms() + REDIRECT_DELAY_MS;
                form.update(|f| f.succeed(Some(REGISTER_SUCCEEDED), Some(at)));
                sleep_ms(REDIRECT_DELAY_MS).await;
                if form.try_update(|f| f.redirect_due(now_ms().max(at))) == Some(true) {
                    redirect.set(Some(LOGIN_PATH));
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
                <h1>"Create your account"</h1>
                <p class="auth-card__subtitle">"Start sharing subscriptions"</p>
                <label class="auth-field">
                    "Email"
                    <input
                        class="auth-input"
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <FieldError form=form field="email"/>
                </label>
                <label class="auth-field">
                    "Username"
                    <input
                        class="auth-input"
                        type="text"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <FieldError form=form field="username"/>
                </label>
                <label class="auth-field">
                    "Password"
                    <input
                        class="auth-input"
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <PasswordStrength password=password/>
                    <FieldError form=form field="password"/>
                </label>
                <FormStatus form=form/>
                <button class="btn btn--primary auth-submit" type="submit" disabled=move || form.with(Submission::is_submitting)>
                    {move || if form.with(Submission::is_submitting) { "Creating account..." } else { "Sign up" }}
                </button>
                <div class="auth-card__links">
                    <a href="/auth/login">"Already have an account? Sign in"</a>
                </div>
            </form>
        </div>
    }
}
