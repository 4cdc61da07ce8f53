//! Modal dialog for joining a room by id.

use leptos::prelude::*;
use workflow::forms::{Submission, validate_room_id};

use crate::components::form_status::{FieldError, FormStatus};
use crate::net::ClientGateway;
use crate::state::notice::NoticeState;
use crate::state::rooms::RoomsState;

#[component]
pub fn JoinRoomDialog(on_close: Callback<()>) -> impl IntoView {
    let gateway = expect_context::<ClientGateway>();
    let rooms = expect_context::<RwSignal<RoomsState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let room_id = RwSignal::new(String::new());
    let submission = RwSignal::new(Submission::default());

    let submit = Callback::new(move |()| {
        let Some(id) = submission.try_update(|s| s.begin(validate_room_id(&room_id.get_untracked()))).flatten() else {
            return;
        };
        #[cfg(feature = "csr")]
        {
            use workflow::forms::JOIN_ROOM_FAILED;

            let gateway = gateway.clone();
            leptos::task::spawn_local(async move {
                match gateway.join_room(&id).await {
                    Ok(ack) => {
                        submission.update(|s| s.succeed(None, None));
                        notices.update(|n| {
                            n.success(ack.message.unwrap_or_else(|| "Joined room successfully".to_owned()));
                        });
                        crate::net::api::load_rooms(&gateway, rooms);
                        on_close.run(());
                    }
                    Err(err) => submission.update(|s| s.fail(&err, JOIN_ROOM_FAILED)),
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (id, &gateway, rooms, notices);
        }
    });

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <form
                class="dialog"
                on:click=move |ev| ev.stop_propagation()
                on:submit=move |ev| {
                    ev.prevent_default();
                    submit.run(());
                }
            >
                <h2>"Join Room"</h2>
                <p class="dialog__hint">"Ask the room owner for the room ID."</p>
                <label class="dialog__label">
                    "Room ID"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || room_id.get()
                        on:input=move |ev| room_id.set(event_target_value(&ev))
                    />
                    <FieldError form=submission field="room_id"/>
                </label>
                <FormStatus form=submission/>
                <div class="dialog__actions">
                    <button class="btn" type="button" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                    <button
                        class="btn btn--primary"
                        type="submit"
                        disabled=move || submission.with(Submission::is_submitting)
                    >
                        {move || if submission.with(Submission::is_submitting) { "Joining..." } else { "Join" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
