//! Inline feedback for forms backed by a [`Submission`].

use leptos::prelude::*;
use workflow::forms::Submission;

/// Message for one field, if validation or the server flagged it.
#[component]
pub fn FieldError(#[prop(into)] form: Signal<Submission>, field: &'static str) -> impl IntoView {
    move || {
        form.with(|s| s.field_error(field).map(str::to_owned))
            .map(|message| view! { <span class="field-error">{message}</span> })
    }
}

/// Generic error and success banners.
#[component]
pub fn FormStatus(#[prop(into)] form: Signal<Submission>, #[prop(optional)] on_dismiss: Option<Callback<()>>) -> impl IntoView {
    let error = move || form.with(|s| s.error().map(str::to_owned));
    let success = move || form.with(|s| s.success().map(str::to_owned));
    let dismiss = move |_| {
        if let Some(on_dismiss) = on_dismiss {
            on_dismiss.run(());
        }
    };

    view! {
        {move || {
            error()
                .map(|message| {
                    view! {
                        <div class="form-status form-status--error" role="alert">
                            <span>{message}</span>
                            <Show when=move || on_dismiss.is_some()>
                                <button class="form-status__close" type="button" on:click=dismiss>
                                    "×"
                                </button>
                            </Show>
                        </div>
                    }
                })
        }}
        {move || success().map(|message| view! { <div class="form-status form-status--success">{message}</div> })}
    }
}
