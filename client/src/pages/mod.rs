//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (fetches, dialogs, redirects)
//! and delegates rendering details to `components`.

pub mod billing;
pub mod dashboard;
pub mod home;
pub mod login;
pub mod profile;
pub mod register;
pub mod reset_password;
pub mod room_detail;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

/// Signal that navigates (replacing history) whenever it is set, so async
/// tasks and view closures only ever hold a `Copy` signal.
pub(crate) fn redirect_signal() -> RwSignal<Option<&'static str>> {
    let target = RwSignal::new(None::<&'static str>);
    let navigate = use_navigate();
    Effect::new(move || {
        if let Some(path) = target.get() {
            navigate(path, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
    target
}
