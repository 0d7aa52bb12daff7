//! Drop Zone Component
//!
//! A slot between cards. Highlights while a dragged card hovers it.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_mouseleave, make_on_slot_mouseenter, DndSignals};

use crate::models::ListId;

/// Slot `index` of a list, numbered against the cards as rendered
#[component]
pub fn DropZone(dnd: DndSignals, list_id: ListId, index: usize) -> impl IntoView {
    let on_mouseenter = make_on_slot_mouseenter(dnd, list_id.clone(), index);
    let on_mouseleave = make_on_mouseleave(dnd);

    let is_over = move || {
        dnd.drop_target_read
            .with(|t| t.as_ref().is_some_and(|slot| slot.column_id == list_id && slot.index == index))
    };
    // Only show when dragging
    let is_visible = move || dnd.dragging_read.with(Option::is_some);

    view! {
        <div
            class=move || {
                let mut c = "drop-zone".to_string();
                if is_over() { c.push_str(" active"); }
                if !is_visible() { c.push_str(" hidden"); }
                c
            }
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
        />
    }
}
