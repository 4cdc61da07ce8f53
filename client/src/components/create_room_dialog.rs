//! Modal dialog for creating a room.

use leptos::prelude::*;
use workflow::forms::{RoomForm, Submission};
use workflow::types::ServiceType;

use crate::components::form_status::{FieldError, FormStatus};
use crate::net::ClientGateway;
use crate::state::notice::NoticeState;
use crate::state::rooms::RoomsState;

#[component]
pub fn CreateRoomDialog(on_close: Callback<()>) -> impl IntoView {
    let gateway = expect_context::<ClientGateway>();
    let rooms = expect_context::<RwSignal<RoomsState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let form = RwSignal::new(RoomForm::default());
    let submission = RwSignal::new(Submission::default());

    let submit = Callback::new(move |()| {
        let Some(request) = submission.try_update(|s| s.begin(form.get_untracked().validate())).flatten() else {
            return;
        };
        #[cfg(feature = "csr")]
        {
            use workflow::forms::CREATE_ROOM_FAILED;

            let gateway = gateway.clone();
            leptos::task::spawn_local(async move {
                match gateway.create_room(&request).await {
                    Ok(_) => {
                        submission.update(|s| s.succeed(None, None));
                        notices.update(|n| {
                            n.success("Room created successfully");
                        });
                        crate::net::api::load_rooms(&gateway, rooms);
                        on_close.run(());
                    }
                    Err(err) => submission.update(|s| s.fail(&err, CREATE_ROOM_FAILED)),
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (request, &gateway, rooms, notices);
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
                <h2>"Create Room"</h2>
                <label class="dialog__label">
                    "Room Name"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || form.with(|f| f.name.clone())
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                    />
                    <FieldError form=submission field="name"/>
                </label>
                <label class="dialog__label">
                    "Description"
                    <textarea
                        class="dialog__input"
                        rows="3"
                        prop:value=move || form.with(|f| f.description.clone())
                        on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                    ></textarea>
                    <FieldError form=submission field="description"/>
                </label>
                <label class="dialog__label">
                    "Service"
                    <select
                        class="dialog__input"
                        prop:value=move || form.with(|f| f.service_type.clone())
                        on:change=move |ev| form.update(|f| f.service_type = event_target_value(&ev))
                    >
                        <option value="">"Select a service"</option>
                        {ServiceType::ALL
                            .into_iter()
                            .map(|service| view! { <option value=service.slug()>{service.label()}</option> })
                            .collect::<Vec<_>>()}
                    </select>
                    <FieldError form=submission field="service_type"/>
                </label>
                <label class="dialog__label">
                    "Monthly Cost"
                    <input
                        class="dialog__input"
                        type="number"
                        min="1"
                        step="any"
                        prop:value=move || form.with(|f| f.cost.clone())
                        on:input=move |ev| form.update(|f| f.cost = event_target_value(&ev))
                    />
                    <FieldError form=submission field="cost"/>
                </label>
                <label class="dialog__label">
                    "Due Date"
                    <input
                        class="dialog__input"
                        type="date"
                        prop:value=move || form.with(|f| f.due_date.clone())
                        on:input=move |ev| form.update(|f| f.due_date = event_target_value(&ev))
                    />
                    <FieldError form=submission field="due_date"/>
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
                        {move || if submission.with(Submission::is_submitting) { "Creating..." } else { "Create" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
