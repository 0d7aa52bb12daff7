//! Leptos DragDrop Utilities
//!
//! Mouse-driven drag-and-drop of cards between ordered columns.
//! Uses movement threshold to distinguish click from drag.

mod gesture;

pub use gesture::{
    Gesture, GestureTracker, DEFAULT_CLICK_THRESHOLD_MS, DEFAULT_DRAG_THRESHOLD_PX,
    MOUSE_POINTER_ID,
};

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Where a drag started: the card and its (column, index)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragSource {
    pub item_id: String,
    pub column_id: String,
    pub index: usize,
}

/// A slot between cards inside a column
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnSlot {
    pub column_id: String,
    pub index: usize,
}

impl ColumnSlot {
    /// Slots are numbered against the column as rendered (dragged card still
    /// in place). Returns the index once the dragged card is taken out.
    pub fn insert_index_for(&self, source: &DragSource) -> usize {
        if self.column_id == source.column_id && self.index > source.index {
            self.index - 1
        } else {
            self.index
        }
    }
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub dragging_read: ReadSignal<Option<DragSource>>,
    pub dragging_write: WriteSignal<Option<DragSource>>,
    pub drop_target_read: ReadSignal<Option<ColumnSlot>>,
    pub drop_target_write: WriteSignal<Option<ColumnSlot>>,
    /// Pressed but not yet dragging
    pub pending_read: ReadSignal<Option<DragSource>>,
    pub pending_write: WriteSignal<Option<DragSource>>,
    /// Classification of the last completed press
    pub last_gesture_read: ReadSignal<Option<Gesture>>,
    pub last_gesture_write: WriteSignal<Option<Gesture>>,
    pub gestures: StoredValue<GestureTracker>,
}

impl DndSignals {
    /// True if the most recent press was a click, not a drag
    pub fn was_click(&self) -> bool {
        self.last_gesture_read.get_untracked() == Some(Gesture::Click)
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging_read.get_untracked().is_some()
    }
}

pub fn create_dnd_signals(click_threshold_ms: f64, drag_threshold_px: i32) -> DndSignals {
    let (dragging_read, dragging_write) = signal(None::<DragSource>);
    let (drop_target_read, drop_target_write) = signal(None::<ColumnSlot>);
    let (pending_read, pending_write) = signal(None::<DragSource>);
    let (last_gesture_read, last_gesture_write) = signal(None::<Gesture>);
    DndSignals {
        dragging_read,
        dragging_write,
        drop_target_read,
        drop_target_write,
        pending_read,
        pending_write,
        last_gesture_read,
        last_gesture_write,
        gestures: StoredValue::new(GestureTracker::new(click_threshold_ms, drag_threshold_px)),
    }
}

fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    dnd.dragging_write.set(None);
    dnd.drop_target_write.set(None);
    dnd.pending_write.set(None);
}

/// Create mousedown handler for draggable cards.
/// Records pending drag with start position.
pub fn make_on_mousedown(dnd: DndSignals, source: DragSource) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
        }
        dnd.pending_write.set(Some(source.clone()));
        dnd.gestures.update_value(|g| g.press(MOUSE_POINTER_ID, ev.client_x(), ev.client_y(), now_ms()));
    }
}

/// Bind document mousemove - starts drag if moved enough
pub fn bind_global_mousemove(dnd: DndSignals) {
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        if dnd.is_dragging() {
            return;
        }
        let Some(pending) = dnd.pending_read.get_untracked() else { return };
        let moved = dnd
            .gestures
            .with_value(|g| g.exceeds_drag_threshold(MOUSE_POINTER_ID, ev.client_x(), ev.client_y()));
        if moved {
            log::debug!("[DND] drag start: {} from {}[{}]", pending.item_id, pending.column_id, pending.index);
            dnd.dragging_write.set(Some(pending));
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
        }
    }
    on_mousemove.forget();
}

/// Create mouseenter handler for a slot inside a column
pub fn make_on_slot_mouseenter(dnd: DndSignals, column_id: String, index: usize) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.is_dragging() {
            dnd.drop_target_write.set(Some(ColumnSlot { column_id: column_id.clone(), index }));
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.is_dragging() {
            dnd.drop_target_write.set(None);
        }
    }
}

/// Bind global mouseup handler for drop detection.
///
/// `on_drop` receives the drag source and the slot under the pointer, or
/// `None` when the card was released outside every column.
pub fn bind_global_mouseup<F>(dnd: DndSignals, on_drop: F)
where
    F: Fn(DragSource, Option<ColumnSlot>) + Clone + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let dragging = dnd.dragging_read.get_untracked();
        let drop_target = dnd.drop_target_read.get_untracked();

        let mut gesture = None;
        dnd.gestures.update_value(|g| gesture = g.release(MOUSE_POINTER_ID, ev.client_x(), ev.client_y(), now_ms()));
        dnd.last_gesture_write.set(gesture);

        end_drag(&dnd);
        // Click event fires naturally on the element when not dragging
        if let Some(source) = dragging {
            on_drop(source, drop_target);
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
        }
    }
    on_mouseup.forget();

    // Also bind global mousemove
    bind_global_mousemove(dnd);
}
