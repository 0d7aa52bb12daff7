//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::board::Board;
use crate::models::{CardId, ListId};
use crate::sync::BoardState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A toast shown to the user
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Lists and their cards; only the sync coordinator writes here
    pub board: Board,
    /// List whose "add card" form is open
    pub adding_card_to: Option<ListId>,
    /// Card shown in the details panel
    pub selected_card: Option<CardId>,
    /// Clicking a card asks to delete it instead of opening it
    pub delete_mode: bool,
    /// Card awaiting delete confirmation: (list, card)
    pub confirm_delete: Option<(ListId, CardId)>,
    pub notices: Vec<Notice>,
    pub next_notice_id: u64,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// One board write per coordinator mutation, so the render layer never sees
/// a half-applied move
impl BoardState for AppStore {
    fn with_board<R>(&self, f: impl FnOnce(&Board) -> R) -> R {
        f(&self.board().read_untracked())
    }

    fn update_board<R>(&self, f: impl FnOnce(&mut Board) -> R) -> R {
        f(&mut self.board().write())
    }
}

// ========================
// Store Helper Functions
// ========================

/// Add a notice and return its id
pub fn store_push_notice(store: &AppStore, kind: NoticeKind, message: String) -> u64 {
    let id = {
        let field = store.next_notice_id();
        let mut next = field.write();
        *next += 1;
        *next
    };
    store.notices().write().push(Notice { id, kind, message });
    id
}

/// Remove a notice by ID
pub fn store_dismiss_notice(store: &AppStore, id: u64) {
    store.notices().write().retain(|n| n.id != id);
}

/// Close the details panel if it shows this card
pub fn store_forget_card(store: &AppStore, card_id: &str) {
    if store.selected_card().get_untracked().as_deref() == Some(card_id) {
        store.selected_card().set(None);
    }
}
