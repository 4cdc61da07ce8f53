//! Account profile: identity, M-Pesa phone number, and password change.

use leptos::prelude::*;
use workflow::forms::{Submission, validate_password_change, validate_phone_update};

use crate::components::form_status::{FieldError, FormStatus};
use crate::components::password_strength::PasswordStrength;
use crate::components::top_bar::TopBar;
use crate::net::{ClientGateway, ClientSession};
use crate::state::auth::AuthState;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let gateway = expect_context::<ClientGateway>();
    let session = expect_context::<ClientSession>();
    let auth = expect_context::<RwSignal<AuthState>>();

    let saved_phone = Memo::new(move |_| auth.with(|a| a.user().and_then(|u| u.phone_number.clone()).unwrap_or_default()));
    let phone = RwSignal::new(saved_phone.get_untracked());
    // Follow the saved number until the user starts editing.
    Effect::new(move |previous: Option<String>| {
        let saved = saved_phone.get();
        if previous.is_none_or(|prev| phone.get_untracked() == prev) {
            phone.set(saved.clone());
        }
        saved
    });
    let phone_form = RwSignal::new(Submission::default());

    let current = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let confirmation = RwSignal::new(String::new());
    let password_form = RwSignal::new(Submission::default());

    let on_phone = {
        let gateway = gateway.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let validated = validate_phone_update(&phone.get_untracked());
            let Some(request) = phone_form.try_update(|f| f.begin(validated)).flatten() else {
                return;
            };
            #[cfg(feature = "csr")]
            {
                use workflow::forms::{PHONE_UPDATE_FAILED, PHONE_UPDATED};

                let gateway = gateway.clone();
                let session = session.clone();
                leptos::task::spawn_local(async move {
                    match gateway.update_phone(&request.phone_number).await {
                        Ok(_) => {
                            phone_form.update(|f| f.succeed(Some(PHONE_UPDATED), None));
                            session.invalidate();
                            crate::net::api::load_session(&session, auth);
                        }
                        Err(err) => {
                            phone.set(saved_phone.get_untracked());
                            phone_form.update(|f| f.fail(&err, PHONE_UPDATE_FAILED));
                        }
                    }
                });
            }
            #[cfg(not(feature = "csr"))]
            {
                let _ = (request, &gateway, &session);
            }
        }
    };

    let on_password = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let validated =
            validate_password_change(&current.get_untracked(), &new_password.get_untracked(), &confirmation.get_untracked());
        let Some(request) = password_form.try_update(|f| f.begin(validated)).flatten() else {
            return;
        };
        #[cfg(feature = "csr")]
        {
            use workflow::forms::{PASSWORD_UPDATE_FAILED, PASSWORD_UPDATED};

            let gateway = gateway.clone();
            leptos::task::spawn_local(async move {
                match gateway.update_password(&request).await {
                    Ok(_) => {
                        password_form.update(|f| f.succeed(Some(PASSWORD_UPDATED), None));
                        current.set(String::new());
                        new_password.set(String::new());
                        confirmation.set(String::new());
                    }
                    Err(err) => password_form.update(|f| f.fail(&err, PASSWORD_UPDATE_FAILED)),
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (request, &gateway);
        }
    };

    let field = move |user: fn(&workflow::types::Session) -> Option<String>| {
        move || auth.with(|a| a.user().and_then(user)).unwrap_or_else(|| "-".to_owned())
    };

    view! {
        <div class="profile-page">
            <TopBar title="Profile"/>
            <section class="profile-card">
                <div class="profile-card__avatar">{move || auth.with(AuthState::initial)}</div>
                <dl class="profile-card__facts">
                    <dt>"Username"</dt>
                    <dd>{field(|u| Some(u.username.clone()))}</dd>
                    <dt>"Email"</dt>
                    <dd>{field(|u| u.email.clone())}</dd>
                </dl>
            </section>

            <form class="profile-form" on:submit=on_phone>
                <h2>"M-Pesa phone number"</h2>
                <label class="auth-field">
                    "Phone"
                    <input
                        class="auth-input"
                        type="tel"
                        placeholder="0712345678"
                        prop:value=move || phone.get()
                        on:input=move |ev| phone.set(event_target_value(&ev))
                    />
                    <FieldError form=phone_form field="phone"/>
                </label>
                <FormStatus form=phone_form/>
                <button class="btn btn--primary" type="submit" disabled=move || phone_form.with(Submission::is_submitting)>
                    {move || if phone_form.with(Submission::is_submitting) { "Saving..." } else { "Save phone" }}
                </button>
            </form>

            <form class="profile-form" on:submit=on_password>
                <h2>"Change password"</h2>
                <label class="auth-field">
                    "Current password"
                    <input
                        class="auth-input"
                        type="password"
                        prop:value=move || current.get()
                        on:input=move |ev| current.set(event_target_value(&ev))
                    />
                    <FieldError form=password_form field="current_password"/>
                </label>
                <label class="auth-field">
                    "New password"
                    <input
                        class="auth-input"
                        type="password"
                        prop:value=move || new_password.get()
                        on:input=move |ev| new_password.set(event_target_value(&ev))
                    />
                    <PasswordStrength password=new_password/>
                    <FieldError form=password_form field="new_password"/>
                </label>
                <label class="auth-field">
                    "Confirm new password"
                    <input
                        class="auth-input"
                        type="password"
                        prop:value=move || confirmation.get()
                        on:input=move |ev| confirmation.set(event_target_value(&ev))
                    />
                    <FieldError form=password_form field="confirm_password"/>
                </label>
                <FormStatus form=password_form/>
                <button
                    class="btn btn--primary"
                    type="submit"
                    disabled=move || password_form.with(Submission::is_submitting)
                >
                    {move || if password_form.with(Submission::is_submitting) { "Updating..." } else { "Update password" }}
                </button>
            </form>
        </div>
    }
}
