//! Study Board App
//!
//! Page shell: header actions, the board grid, and the overlays.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::components::{BoardGrid, CardDetails, ConfirmDeleteCard, NewCardForm, NewListForm, Notices};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::store::{AppState, AppStateStoreFields};

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let store = Store::new(AppState::default());
    provide_context(store);
    let ctx = AppContext::new(store, config);
    provide_context(ctx);

    // Load the board on mount
    Effect::new(move |_| {
        spawn_local(async move {
            if let Err(e) = ctx.sync().load().await {
                ctx.notify_error(&e);
            }
        });
    });

    let toggle_delete_mode = move |_| {
        store.delete_mode().update(|on| *on = !*on);
        store.confirm_delete().set(None);
    };

    view! {
        <div class="board-page">
            <header class="board-header">
                <div>
                    <p class="board-tag">"#study"</p>
                    <h1>"What are we studying today?"</h1>
                </div>
                <div class="board-actions">
                    <NewListForm />
                    <button
                        class=move || if store.delete_mode().get() { "delete-mode-btn active" } else { "delete-mode-btn" }
                        on:click=toggle_delete_mode
                    >
                        {move || if store.delete_mode().get() { "Done deleting" } else { "Delete cards" }}
                    </button>
                </div>
            </header>
            <Show when=move || store.delete_mode().get()>
                <p class="delete-mode-hint">"Click a card to delete it."</p>
            </Show>
            <BoardGrid />
            <NewCardForm />
            <ConfirmDeleteCard />
            <CardDetails />
            <Notices />
        </div>
    }
}
