//! Card Details Component
//!
//! Side panel for the selected card: edit the title, attach a PDF and
//! preview the first one.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::FilePicker;
use crate::context::{use_app_context, AppContext};
use crate::models::{CardId, FileUpload};
use crate::store::AppStateStoreFields;

/// Select a card and refresh its attachments from the service
pub fn open_card(ctx: AppContext, card_id: CardId) {
    ctx.store.selected_card().set(Some(card_id.clone()));
    spawn_local(async move {
        if let Err(e) = ctx.sync().open_card(&card_id).await {
            ctx.notify_error(&e);
        }
    });
}

#[component]
pub fn CardDetails() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;

    let card = move || {
        store
            .selected_card()
            .with(|id| id.as_deref().and_then(|id| store.board().read().card(id).cloned()))
    };

    let (title, set_title) = signal(String::new());
    let pdf = RwSignal::new(None::<FileUpload>);
    let (saving, set_saving) = signal(false);

    // Reset the form whenever another card is selected
    Effect::new(move |_| {
        let selected = store.selected_card().get();
        let current = selected
            .as_deref()
            .and_then(|id| store.board().read_untracked().card(id).map(|c| c.title.clone()));
        set_title.set(current.unwrap_or_default());
        pdf.set(None);
    });

    let close = move || store.selected_card().set(None);

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(card_id) = store.selected_card().get_untracked() else { return };
        if saving.get_untracked() {
            return;
        }
        let text = title.get_untracked();
        let files: Vec<FileUpload> = pdf.get_untracked().into_iter().collect();
        set_saving.set(true);
        spawn_local(async move {
            match ctx.sync().rename_card(&card_id, &text, files).await {
                Ok(saved) => {
                    pdf.set(None);
                    ctx.notify_success("Card saved");
                    if let Some(e) = saved.upload_error {
                        ctx.notify_error(&e);
                    }
                }
                Err(e) => ctx.notify_error(&e),
            }
            set_saving.set(false);
        });
    };

    let preview = move || {
        card().and_then(|c| {
            c.first_pdf().map(|att| {
                let src = ctx.config.with_value(|cfg| cfg.asset_url(&att.url));
                view! { <iframe class="pdf-preview" src=src title=att.filename.clone() /> }
            })
        })
    };

    view! {
        <Show when=move || card().is_some()>
            <aside class="card-details">
                <header class="card-details-header">
                    <h3>"Card details"</h3>
                    <button class="close-btn" on:click=move |_| close()>"×"</button>
                </header>
                <form class="card-details-form" on:submit=save>
                    <input
                        type="text"
                        prop:value=move || title.get()
                        on:input=move |ev| set_title.set(event_target_value(&ev))
                    />
                    <FilePicker
                        accept="application/pdf"
                        label="Attach PDF"
                        on_pick=move |upload: FileUpload| pdf.set(Some(upload))
                    />
                    {move || pdf.with(|f| f.as_ref().map(|f| view! { <span class="picked-file">{f.filename.clone()}</span> }))}
                    <button type="submit" disabled=move || saving.get()>"Save"</button>
                </form>
                {move || {
                    let shown = preview();
                    let empty = shown.is_none();
                    view! {
                        {shown}
                        {empty.then(|| view! { <p class="no-pdf">"No PDF attached."</p> })}
                    }
                }}
            </aside>
        </Show>
    }
}
