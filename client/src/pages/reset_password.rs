//! Three-step password reset: request a code, verify it, choose a new
//! password.

use leptos::prelude::*;
use workflow::reset::{ResetStep, ResetWizard};

use crate::components::form_status::{FieldError, FormStatus};
use crate::components::password_strength::PasswordStrength;
use crate::net::ClientGateway;
use crate::pages::redirect_signal;

#[cfg(test)]
#[path = "reset_password_test.rs"]
mod reset_password_test;

const STEPS: [ResetStep; 3] = [ResetStep::RequestOtp, ResetStep::VerifyOtp, ResetStep::SetNewPassword];

fn stepper_class(current: ResetStep, step: ResetStep) -> &'static str {
    if current == step {
        "stepper__step stepper__step--active"
    } else if current.index() > step.index() {
        "stepper__step stepper__step--done"
    } else {
        "stepper__step"
    }
}

/// Which request to send once the wizard has accepted the input.
#[cfg_attr(not(feature = "csr"), allow(dead_code))]
enum Outgoing {
    Send(String),
    Verify(String, String),
    Reset(workflow::types::ResetPasswordRequest),
}

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let gateway = expect_context::<ClientGateway>();
    let redirect = redirect_signal();
    let wizard = RwSignal::new(ResetWizard::default());
    let email = RwSignal::new(String::new());
    let otp = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirmation = RwSignal::new(String::new());

    let form = Signal::derive(move || wizard.with(|w| w.form().clone()));
    let step = Memo::new(move |_| wizard.with(ResetWizard::step));
    let busy = move || wizard.with(|w| w.form().is_submitting());

    let send = move |outgoing: Outgoing| {
        #[cfg(feature = "csr")]
        {
            use workflow::guard::LOGIN_PATH;

            use crate::util::clock::{now_ms, sleep_ms};

            let gateway = gateway.clone();
            leptos::task::spawn_local(async move {
                let result = match &outgoing {
                    Outgoing::Send(email) => gateway.send_reset_otp(email).await,
                    Outgoing::Verify(email, otp) => gateway.verify_reset_otp(email, otp).await,
                    Outgoing::Reset(request) => gateway.reset_password(request).await,
                };
                let started = now_ms();
                wizard.update(|w| w.complete(result.map(|_| ()), started));
                if wizard.with_untracked(|w| w.step() != ResetStep::Done) {
                    return;
                }
                sleep_ms(workflow::forms::REDIRECT_DELAY_MS).await;
                let due_at = started + workflow::forms::REDIRECT_DELAY_MS;
                if wizard.try_update(|w| w.redirect_due(now_ms().max(due_at))) == Some(true) {
                    redirect.set(Some(LOGIN_PATH));
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (outgoing, &gateway, redirect);
        }
    };

    let on_request = {
        let send = send.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if let Some(address) = wizard.try_update(|w| w.request_otp(&email.get_untracked())).flatten() {
                send(Outgoing::Send(address));
            }
        }
    };
    let on_resend = {
        let send = send.clone();
        move |_| {
            if let Some(address) = wizard.try_update(ResetWizard::resend_otp).flatten() {
                send(Outgoing::Send(address));
            }
        }
    };
    let on_verify = {
        let send = send.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if let Some((address, code)) = wizard.try_update(|w| w.verify_otp(&otp.get_untracked())).flatten() {
                send(Outgoing::Verify(address, code));
            }
        }
    };
    let on_reset = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let accepted = wizard
            .try_update(|w| w.set_password(&password.get_untracked(), &confirmation.get_untracked()))
            .flatten();
        if let Some(request) = accepted {
            send(Outgoing::Reset(request));
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Reset password"</h1>
                <ol class="stepper">
                    {STEPS
                        .into_iter()
                        .map(|s| {
                            view! {
                                <li class=move || stepper_class(step.get(), s)>{s.title()}</li>
                            }
                        })
                        .collect::<Vec<_>>()}
                </ol>
                <FormStatus form=form on_dismiss=Callback::new(move |()| wizard.update(ResetWizard::dismiss))/>
                {move || match step.get() {
                    ResetStep::RequestOtp => {
                        view! {
                            <form class="auth-form" on:submit=on_request.clone()>
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
                                <button class="btn btn--primary auth-submit" type="submit" disabled=busy>
                                    {move || if busy() { "Sending..." } else { "Send OTP" }}
                                </button>
                            </form>
                        }
                            .into_any()
                    }
                    ResetStep::VerifyOtp => {
                        view! {
                            <form class="auth-form" on:submit=on_verify.clone()>
                                <p class="auth-card__subtitle">
                                    "Enter the code sent to " {move || wizard.with(|w| w.email().to_owned())}
                                </p>
                                <label class="auth-field">
                                    "OTP"
                                    <input
                                        class="auth-input auth-input--code"
                                        type="text"
                                        inputmode="numeric"
                                        maxlength="6"
                                        prop:value=move || otp.get()
                                        on:input=move |ev| otp.set(event_target_value(&ev))
                                    />
                                    <FieldError form=form field="otp"/>
                                </label>
                                <button class="btn btn--primary auth-submit" type="submit" disabled=busy>
                                    {move || if busy() { "Verifying..." } else { "Verify OTP" }}
                                </button>
                                <button class="btn btn--link" type="button" disabled=busy on:click=on_resend.clone()>
                                    "Resend OTP"
                                </button>
                            </form>
                        }
                            .into_any()
                    }
                    ResetStep::SetNewPassword => {
                        view! {
                            <form class="auth-form" on:submit=on_reset.clone()>
                                <label class="auth-field">
                                    "New password"
                                    <input
                                        class="auth-input"
                                        type="password"
                                        prop:value=move || password.get()
                                        on:input=move |ev| password.set(event_target_value(&ev))
                                    />
                                    <PasswordStrength password=password/>
                                    <FieldError form=form field="new_password"/>
                                </label>
                                <label class="auth-field">
                                    "Confirm password"
                                    <input
                                        class="auth-input"
                                        type="password"
                                        prop:value=move || confirmation.get()
                                        on:input=move |ev| confirmation.set(event_target_value(&ev))
                                    />
                                    <FieldError form=form field="confirm_password"/>
                                </label>
                                <button class="btn btn--primary auth-submit" type="submit" disabled=busy>
                                    {move || if busy() { "Resetting..." } else { "Reset password" }}
                                </button>
                            </form>
                        }
                            .into_any()
                    }
                    ResetStep::Done => view! { <p class="auth-card__subtitle">"You can now sign in."</p> }.into_any(),
                }}
                <div class="auth-card__links">
                    <a href="/auth/login">"Back to sign in"</a>
                </div>
            </div>
        </div>
    }
}
