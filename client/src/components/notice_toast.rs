//! Toast stack for transient notices.

use leptos::prelude::*;

use crate::state::notice::{Notice, NoticeState};

#[component]
pub fn NoticeToast() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();

    view! {
        <div class="notice-stack" aria-live="polite">
            <For
                each=move || notices.get().items
                key=|notice| notice.id
                children=move |notice: Notice| view! { <NoticeItem notice=notice notices=notices/> }
            />
        </div>
    }
}

#[component]
fn NoticeItem(notice: Notice, notices: RwSignal<NoticeState>) -> impl IntoView {
    let id = notice.id;

    #[cfg(feature = "csr")]
    leptos::task::spawn_local(async move {
        crate::util::clock::sleep_ms(crate::state::notice::NOTICE_TIMEOUT_MS).await;
        notices.try_update(|n| n.dismiss(id));
    });

    view! {
        <div class=notice.kind.class() role="status">
            <span class="notice__message">{notice.message}</span>
            <button
                class="notice__close"
                aria-label="Dismiss"
                on:click=move |_| notices.update(|n| n.dismiss(id))
            >
                "✕"
            </button>
        </div>
    }
}
