//! Board Grid Component
//!
//! Horizontally scrolling row of list columns. Owns the drag-and-drop
//! state and turns a finished drag into a `DropResult`.

use leptos::prelude::*;
use leptos_dragdrop::{bind_global_mouseup, create_dnd_signals, ColumnSlot, DragSource};

use crate::board::{DragLocation, DropResult};
use crate::components::ListColumn;
use crate::context::use_app_context;
use crate::store::AppStateStoreFields;

/// Distance moved by the scroll buttons
const SCROLL_STEP_PX: f64 = 300.0;

fn drop_result(source: DragSource, target: Option<ColumnSlot>) -> DropResult {
    let destination = target.map(|slot| {
        let index = slot.insert_index_for(&source);
        DragLocation::new(slot.column_id, index)
    });
    DropResult {
        card_id: source.item_id,
        source: DragLocation::new(source.column_id, source.index),
        destination,
    }
}

#[component]
pub fn BoardGrid() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;

    let (click_ms, drag_px) = ctx.config.with_value(|c| (c.click_threshold_ms, c.drag_threshold_px));
    let dnd = create_dnd_signals(click_ms, drag_px);

    bind_global_mouseup(dnd, move |source, target| {
        let drop = drop_result(source, target);
        if let Err(e) = ctx.sync().move_card(&drop) {
            ctx.notify_error(&e);
        }
    });

    let grid_ref = NodeRef::<leptos::html::Div>::new();
    let scroll_by = move |dx: f64| {
        let Some(grid) = grid_ref.get() else { return };
        let options = web_sys::ScrollToOptions::new();
        options.set_left(dx);
        options.set_behavior(web_sys::ScrollBehavior::Smooth);
        grid.scroll_by_with_scroll_to_options(&options);
    };

    let lists = move || store.board().read().lists().to_vec();

    view! {
        <div class="board-scroll">
            <button class="scroll-btn scroll-left" on:click=move |_| scroll_by(-SCROLL_STEP_PX)>"‹"</button>
            <div class="board-grid" node_ref=grid_ref>
                <For
                    each=lists
                    key=|list| (list.id.clone(), list.name.clone())
                    children=move |list| view! { <ListColumn list=list dnd=dnd /> }
                />
                <Show when=move || store.board().read().lists().is_empty()>
                    <p class="board-empty">"No lists yet. Create one to get started."</p>
                </Show>
            </div>
            <button class="scroll-btn scroll-right" on:click=move |_| scroll_by(SCROLL_STEP_PX)>"›"</button>
        </div>
    }
}
