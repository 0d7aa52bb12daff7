//! New Card Form Component
//!
//! Modal form for adding a card to the list picked with "+ Add card".
//! An optional image is uploaded once the card exists.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::FilePicker;
use crate::context::use_app_context;
use crate::models::FileUpload;
use crate::store::AppStateStoreFields;

#[component]
pub fn NewCardForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;

    let (title, set_title) = signal(String::new());
    let image = RwSignal::new(None::<FileUpload>);
    let (saving, set_saving) = signal(false);

    let close = move || {
        store.adding_card_to().set(None);
        set_title.set(String::new());
        image.set(None);
    };

    let list_name = move || {
        store.adding_card_to().with(|target| {
            target
                .as_deref()
                .and_then(|id| store.board().read().list(id).map(|l| l.name.clone()))
                .unwrap_or_default()
        })
    };

    let create_card = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let list_id = store.adding_card_to().get_untracked();
        let text = title.get_untracked();
        let files: Vec<FileUpload> = image.get_untracked().into_iter().collect();
        set_saving.set(true);
        spawn_local(async move {
            match ctx.sync().create_card(list_id.as_deref(), &text, files).await {
                Ok(saved) => {
                    close();
                    ctx.notify_success("Card created");
                    if let Some(e) = saved.upload_error {
                        ctx.notify_error(&e);
                    }
                }
                Err(e) => ctx.notify_error(&e),
            }
            set_saving.set(false);
        });
    };

    view! {
        <Show when=move || store.adding_card_to().with(Option::is_some)>
            <div class="modal-backdrop">
                <form class="modal new-card-form" on:submit=create_card>
                    <h3>"Add card to " {list_name}</h3>
                    <input
                        type="text"
                        placeholder="Card title..."
                        prop:value=move || title.get()
                        on:input=move |ev| set_title.set(event_target_value(&ev))
                    />
                    <FilePicker
                        accept="image/*"
                        label="Image (optional)"
                        on_pick=move |upload: FileUpload| image.set(Some(upload))
                    />
                    {move || image.with(|img| img.as_ref().map(|f| view! { <span class="picked-file">{f.filename.clone()}</span> }))}
                    <div class="modal-actions">
                        <button type="submit" disabled=move || saving.get()>"Create"</button>
                        <button type="button" on:click=move |_| close()>"Cancel"</button>
                    </div>
                </form>
            </div>
        </Show>
    }
}
