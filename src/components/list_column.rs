//! List Column Component
//!
//! One list: header with delete, its cards with drop slots between them,
//! and the "add card" button.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{make_on_mousedown, DndSignals, DragSource};

use crate::components::{open_card, DeleteConfirmButton, DropZone};
use crate::context::use_app_context;
use crate::models::{BoardList, Card};
use crate::store::{store_forget_card, AppStateStoreFields};

/// Identity of a rendered tile. Any change to what the tile shows,
/// attachments included, must change the key so the tile is rebuilt.
type TileKey = (String, String, Vec<String>, usize);

fn tile_key(index: usize, card: &Card) -> TileKey {
    let attachments = card.attachments.iter().map(|a| a.url.clone()).collect();
    (card.id.clone(), card.title.clone(), attachments, index)
}

#[component]
fn CardTile(card: Card, list_id: String, index: usize, dnd: DndSignals) -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;
    let card_id = card.id.clone();

    let on_mousedown = make_on_mousedown(
        dnd,
        DragSource { item_id: card_id.clone(), column_id: list_id.clone(), index },
    );

    let is_dragging = {
        let card_id = card_id.clone();
        move || dnd.dragging_read.with(|d| d.as_ref().is_some_and(|s| s.item_id == card_id))
    };

    let on_click = move |_: web_sys::MouseEvent| {
        if store.delete_mode().get_untracked() {
            store.confirm_delete().set(Some((list_id.clone(), card_id.clone())));
        } else if dnd.was_click() {
            open_card(ctx, card_id.clone());
        }
    };

    let has_pdf = card.first_pdf().is_some();
    let thumbnail = card.images().next().map(|img| ctx.config.with_value(|c| c.asset_url(&img.url)));

    view! {
        <div
            class=move || {
                let mut c = "card".to_string();
                if is_dragging() { c.push_str(" dragging"); }
                if store.delete_mode().get() { c.push_str(" deletable"); }
                c
            }
            on:mousedown=on_mousedown
            on:click=on_click
        >
            {thumbnail.map(|src| view! { <img class="card-thumb" src=src alt="" /> })}
            <span class="card-title">{card.title.clone()}</span>
            {has_pdf.then(|| view! { <span class="card-badge">"PDF"</span> })}
        </div>
    }
}

#[component]
pub fn ListColumn(list: BoardList, dnd: DndSignals) -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;
    let list_id = list.id.clone();

    let cards = {
        let list_id = list_id.clone();
        move || store.board().read().cards(&list_id).iter().cloned().enumerate().collect::<Vec<_>>()
    };
    let card_count = {
        let list_id = list_id.clone();
        move || store.board().read().cards(&list_id).len()
    };

    let on_delete = {
        let list_id = list_id.clone();
        Callback::new(move |_: ()| {
            let list_id = list_id.clone();
            spawn_local(async move {
                match ctx.sync().delete_list(&list_id).await {
                    Ok(()) => ctx.notify_success("List deleted"),
                    Err(e) => ctx.notify_error(&e),
                }
            });
        })
    };

    let on_add_card = {
        let list_id = list_id.clone();
        move |_| store.adding_card_to().set(Some(list_id.clone()))
    };

    let slot_list_id = list_id.clone();
    let tail_list_id = list_id.clone();

    view! {
        <section class="list-column">
            <header class="list-header">
                <h2 class="list-name">{list.name.clone()}</h2>
                <span class="list-count">{card_count.clone()}</span>
                <DeleteConfirmButton button_class="list-delete-btn" title="Delete list" on_confirm=on_delete />
            </header>
            <div class="list-cards">
                <For
                    each=cards
                    key=|(index, card)| tile_key(*index, card)
                    children=move |(index, card)| {
                        let list_id = slot_list_id.clone();
                        view! {
                            <DropZone dnd=dnd list_id=list_id.clone() index=index />
                            <CardTile card=card list_id=list_id index=index dnd=dnd />
                        }
                    }
                />
                {move || view! { <DropZone dnd=dnd list_id=tail_list_id.clone() index=card_count() /> }}
            </div>
            <button class="add-card-btn" on:click=on_add_card>"+ Add card"</button>
        </section>
    }
}

/// Modal asking to confirm a card delete picked in delete mode
#[component]
pub fn ConfirmDeleteCard() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;

    let title = move || {
        store.confirm_delete().with(|pending| {
            pending.as_ref().map(|(_, card_id)| {
                store.board().read().card(card_id).map(|c| c.title.clone()).unwrap_or_default()
            })
        })
    };

    let on_confirm = move |_| {
        let Some((list_id, card_id)) = store.confirm_delete().get_untracked() else { return };
        store.confirm_delete().set(None);
        store.delete_mode().set(false);
        store_forget_card(&store, &card_id);
        spawn_local(async move {
            match ctx.sync().delete_card(&list_id, &card_id).await {
                Ok(()) => ctx.notify_success("Card deleted"),
                Err(e) => ctx.notify_error(&e),
            }
        });
    };

    view! {
        <Show when=move || store.confirm_delete().with(Option::is_some)>
            <div class="modal-backdrop">
                <div class="modal">
                    <p>"Delete card \"" {title} "\"?"</p>
                    <div class="modal-actions">
                        <button class="danger" on:click=on_confirm>"Delete"</button>
                        <button on:click=move |_| store.confirm_delete().set(None)>"Cancel"</button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
