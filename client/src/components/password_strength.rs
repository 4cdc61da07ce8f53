//! Password strength meter shown under new-password inputs.

use leptos::prelude::*;
use workflow::forms::{StrengthLabel, password_strength};

fn meter_class(label: StrengthLabel) -> &'static str {
    match label {
        StrengthLabel::Weak => "strength strength--weak",
        StrengthLabel::Fair => "strength strength--fair",
        StrengthLabel::Good => "strength strength--good",
        StrengthLabel::Strong => "strength strength--strong",
    }
}

#[component]
pub fn PasswordStrength(#[prop(into)] password: Signal<String>) -> impl IntoView {
    let strength = Memo::new(move |_| password_strength(&password.get()));

    view! {
        <Show when=move || !password.get().is_empty()>
            <div class=move || meter_class(strength.get().label())>
                <div class="strength__bar" style:width=move || format!("{}%", strength.get().score)></div>
                <span class="strength__label">{move || strength.get().label().as_str()}</span>
            </div>
        </Show>
    }
}
